//! System-catalog introspection.
//!
//! Tarantool exposes its schema through reserved, protocol-readable spaces:
//! a space directory (`_vspace`), an index directory (`_vindex`) and a
//! foreign-key constraint catalog (`_fk_constraint`). Every call here
//! re-reads the catalogs; nothing is cached, which is acceptable for
//! infrequent metadata-driven calls but not for hot-path queries.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::{TntError, TntResult};
use super::types::TntValue;

// ============================================================================
// Catalog layout (versioned protocol contract)
// ============================================================================
//
// Tuple offsets below are a wire contract with the server's catalog layout.
// Any change of these offsets across server versions is a breaking
// compatibility event requiring a new projection table.

/// Space directory (`_vspace`) space id.
pub const VSPACE_ID: u32 = 281;
/// Index directory (`_vindex`) space id.
pub const VINDEX_ID: u32 = 289;
/// Foreign-key constraint catalog (`_fk_constraint`) space id.
pub const FK_CONSTRAINT_ID: u32 = 356;

/// Id of the name index within the space directory.
pub const VSPACE_NAME_INDEX: u32 = 2;
/// Id of the primary (id) index, shared by all three catalogs.
const PRIMARY_INDEX: u32 = 0;

/// Space-directory tuple: space id.
const SPACE_TUPLE_ID: usize = 0;
/// Space-directory tuple: space name.
const SPACE_TUPLE_NAME: usize = 2;
/// Space-directory tuple: field-definition list.
const SPACE_TUPLE_FORMAT: usize = 6;

/// Index-directory tuple: covered-field (parts) list.
const INDEX_TUPLE_PARTS: usize = 5;

/// Constraint-catalog tuple: child space id.
const FK_TUPLE_CHILD_ID: usize = 1;
/// Constraint-catalog tuple: parent space id.
const FK_TUPLE_PARENT_ID: usize = 2;
/// Constraint-catalog tuple: child field-number list.
const FK_TUPLE_CHILD_COLS: usize = 7;
/// Constraint-catalog tuple: parent field-number list.
const FK_TUPLE_PARENT_COLS: usize = 8;

/// Prefix reserved for system spaces.
const SYSTEM_SPACE_PREFIX: char = '_';

// ============================================================================
// Introspection results
// ============================================================================

/// One field of a space's format definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub field_type: String,
    pub nullable: bool,
}

/// One foreign-key reference pointing at a primary-key field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Referencing column in the child space.
    pub column: String,
    /// Name of the child space.
    pub table: String,
}

// ============================================================================
// Tuple projections
// ============================================================================

fn tuple_u32(tuple: &[TntValue], pos: usize, what: &str) -> TntResult<u32> {
    tuple
        .get(pos)
        .and_then(TntValue::as_u32)
        .ok_or_else(|| TntError::Type(format!("{} missing at tuple position {}", what, pos)))
}

fn tuple_str<'a>(tuple: &'a [TntValue], pos: usize, what: &str) -> TntResult<&'a str> {
    tuple
        .get(pos)
        .and_then(TntValue::as_str)
        .ok_or_else(|| TntError::Type(format!("{} missing at tuple position {}", what, pos)))
}

/// Project the field-definition list out of a space-directory tuple.
fn space_fields(tuple: &[TntValue]) -> TntResult<Vec<FieldInfo>> {
    let format = tuple
        .get(SPACE_TUPLE_FORMAT)
        .and_then(TntValue::as_array)
        .ok_or_else(|| {
            TntError::Type(format!(
                "field-definition list missing at tuple position {}",
                SPACE_TUPLE_FORMAT
            ))
        })?;

    let mut fields = Vec::with_capacity(format.len());
    for def in format {
        let name = def
            .lookup("name")
            .and_then(TntValue::as_str)
            .ok_or_else(|| TntError::Type("field definition without a name".to_string()))?;
        let field_type = def
            .lookup("type")
            .and_then(TntValue::as_str)
            .unwrap_or("any");
        let nullable = def
            .lookup("is_nullable")
            .and_then(TntValue::as_bool)
            .unwrap_or(false);
        fields.push(FieldInfo {
            name: name.to_string(),
            field_type: field_type.to_string(),
            nullable,
        });
    }
    Ok(fields)
}

/// Project the covered field numbers out of an index-directory tuple.
///
/// Parts come either as maps with a `field` key or in the legacy array form
/// `[field_no, type]`.
fn index_field_numbers(tuple: &[TntValue]) -> TntResult<Vec<u32>> {
    let parts = tuple
        .get(INDEX_TUPLE_PARTS)
        .and_then(TntValue::as_array)
        .ok_or_else(|| {
            TntError::Type(format!(
                "covered-field list missing at tuple position {}",
                INDEX_TUPLE_PARTS
            ))
        })?;

    let mut numbers = Vec::with_capacity(parts.len());
    for part in parts {
        let field_no = match part {
            TntValue::Map(_) => part.lookup("field").and_then(TntValue::as_u32),
            TntValue::Array(items) => items.first().and_then(TntValue::as_u32),
            _ => None,
        }
        .ok_or_else(|| TntError::Type("index part without a field number".to_string()))?;
        numbers.push(field_no);
    }
    Ok(numbers)
}

/// Project a field-number list out of a constraint-catalog tuple.
fn fk_field_numbers(tuple: &[TntValue], pos: usize) -> TntResult<Vec<u32>> {
    let list = tuple.get(pos).and_then(TntValue::as_array).ok_or_else(|| {
        TntError::Type(format!("field-number list missing at tuple position {}", pos))
    })?;
    list.iter()
        .map(|v| {
            v.as_u32()
                .ok_or_else(|| TntError::Type(format!("non-numeric field number: {:?}", v)))
        })
        .collect()
}

// ============================================================================
// Introspector
// ============================================================================

/// Schema introspection over the raw protocol client.
///
/// Invoked independently of the statement path, directly against the
/// underlying client.
pub struct SchemaIntrospector<'c, C: Client> {
    client: &'c mut C,
}

impl<'c, C: Client> SchemaIntrospector<'c, C> {
    pub fn new(client: &'c mut C) -> Self {
        Self { client }
    }

    /// Resolve a space name to its id through the space directory.
    pub async fn resolve_space_id(&mut self, name: &str) -> TntResult<u32> {
        let rows = self
            .client
            .select(VSPACE_ID, VSPACE_NAME_INDEX, &[TntValue::from(name)])
            .await?;
        let tuple = rows
            .first()
            .ok_or_else(|| TntError::UnknownSpace(name.to_string()))?;
        tuple_u32(tuple, SPACE_TUPLE_ID, "space id")
    }

    /// Fetch a space-directory tuple by space id.
    async fn space_tuple(&mut self, space_id: u32) -> TntResult<Vec<TntValue>> {
        let mut rows = self
            .client
            .select(VSPACE_ID, PRIMARY_INDEX, &[TntValue::from(space_id)])
            .await?;
        if rows.is_empty() {
            return Err(TntError::Protocol(format!(
                "space {} missing from space directory",
                space_id
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// Ordered field metadata for a space, by name.
    pub async fn fields_info(&mut self, table_name: &str) -> TntResult<Vec<FieldInfo>> {
        let space_id = self.resolve_space_id(table_name).await?;
        let tuple = self.space_tuple(space_id).await?;
        space_fields(&tuple)
    }

    /// Field names covered by the space's first index, in index order.
    ///
    /// Empty when the space defines no fields or no index.
    pub async fn primary_keys(&mut self, table_name: &str) -> TntResult<Vec<String>> {
        let space_id = self.resolve_space_id(table_name).await?;
        let tuple = self.space_tuple(space_id).await?;
        let fields = space_fields(&tuple)?;

        let indexes = self
            .client
            .select(VINDEX_ID, PRIMARY_INDEX, &[TntValue::from(space_id)])
            .await?;

        let mut pks = Vec::new();
        if let (false, Some(first_index)) = (fields.is_empty(), indexes.first()) {
            for field_no in index_field_numbers(first_index)? {
                // Field numbers outside the format list are skipped, not errors.
                if let Some(field) = fields.get(field_no as usize) {
                    pks.push(field.name.clone());
                }
            }
        }
        Ok(pks)
    }

    /// Foreign keys referencing `pk_name` of `table_name`.
    ///
    /// Scans the constraint catalog for entries whose parent space matches,
    /// then resolves child space and field numbers back to names. Empty when
    /// no constraint references the given key.
    pub async fn foreign_keys(
        &mut self,
        table_name: &str,
        pk_name: &str,
    ) -> TntResult<Vec<ForeignKeyRef>> {
        let parent_id = self.resolve_space_id(table_name).await?;
        let parent_tuple = self.space_tuple(parent_id).await?;
        let parent_fields = space_fields(&parent_tuple)?;

        let pk_field_no = match parent_fields.iter().position(|f| f.name == pk_name) {
            Some(pos) => pos as u32,
            // A key no constraint can reference yields no matches.
            None => return Ok(Vec::new()),
        };

        let constraints = self
            .client
            .select(FK_CONSTRAINT_ID, PRIMARY_INDEX, &[])
            .await?;

        let mut refs = Vec::new();
        for constraint in &constraints {
            if tuple_u32(constraint, FK_TUPLE_PARENT_ID, "parent space id")? != parent_id {
                continue;
            }
            let parent_cols = fk_field_numbers(constraint, FK_TUPLE_PARENT_COLS)?;
            let child_cols = fk_field_numbers(constraint, FK_TUPLE_CHILD_COLS)?;
            let child_id = tuple_u32(constraint, FK_TUPLE_CHILD_ID, "child space id")?;

            for (pos, parent_col) in parent_cols.iter().enumerate() {
                if *parent_col != pk_field_no {
                    continue;
                }
                let Some(child_col) = child_cols.get(pos) else {
                    continue;
                };
                let child_tuple = self.space_tuple(child_id).await?;
                let child_name = tuple_str(&child_tuple, SPACE_TUPLE_NAME, "space name")?;
                let child_fields = space_fields(&child_tuple)?;
                if let Some(field) = child_fields.get(*child_col as usize) {
                    refs.push(ForeignKeyRef {
                        column: field.name.clone(),
                        table: child_name.to_string(),
                    });
                }
            }
        }
        Ok(refs)
    }

    /// All user-space names, system spaces excluded.
    pub async fn space_names(&mut self) -> TntResult<Vec<String>> {
        let rows = self.client.select(VSPACE_ID, VSPACE_NAME_INDEX, &[]).await?;
        let mut names = Vec::new();
        for tuple in &rows {
            let name = tuple_str(tuple, SPACE_TUPLE_NAME, "space name")?;
            if !name.starts_with(SYSTEM_SPACE_PREFIX) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}
