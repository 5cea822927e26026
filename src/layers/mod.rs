pub mod marker;
pub mod styler;

pub use marker::{
    css, z_index_for_latitude, Marker, MarkerElement, MarkerStyle, MemoryElement,
};
pub use styler::MarkerStyler;
