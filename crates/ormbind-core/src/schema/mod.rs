//! Bound relational schema objects.
//!
//! Plain data produced by [`bind`](crate::bind::bind): tables, columns,
//! primary keys, and one shaped binding per managed type. Everything here
//! is addressed by stable index ids and serializes as-is for downstream
//! schema and runtime consumers.

mod binding;
mod column;
mod model;
mod table;
mod value;

pub use binding::{
    BindingId, CallbackBinding, CustomSql, FilterBinding, IdentifierBinding, RootDetails,
    SecondaryTableJoin, Shape, SoftDeleteBinding, TypeBinding,
};
pub use column::{Column, ColumnRef};
pub use model::BoundModel;
pub use table::{PrimaryKey, Table, TableId, TableKind};
pub use value::{BasicValue, ComponentValue, Property, Value};
