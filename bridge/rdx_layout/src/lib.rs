//! Array layouts for the rdx bridge.
//!
//! - `shape`: decide whether a source array is rectangular and measure it
//! - `flat`: move buffers between nested order and the three `ArrayOrder`
//!   layouts, and stack same-shaped buffers under one extra dimension
//! - `rebuild`: the reverse direction, turning target columns and buffers
//!   back into source lists, maps, records and arrays
//!
//! "Nested order" throughout means the natural order of a source array: the
//! last index varies fastest. Dimension vectors handed to the target are
//! always in the target's own order, where the first index varies fastest.

mod error;
pub mod flat;
pub mod rebuild;
pub mod shape;

pub use error::LayoutError;
pub use flat::{
    flatten, flatten_buffer, permute_dims, restore_dims, stack, stack_buffers, unflatten,
    unflatten_buffer,
};
pub use rebuild::{
    create_list, create_list_of_records, create_map, create_nd_array, records_from_columns, Record,
};
pub use shape::{inspect, leaves, Shape};
