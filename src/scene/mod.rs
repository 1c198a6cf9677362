//! Scene content owned by the viewer: the model transform and the star
//! field.

pub mod model;
pub mod starfield;

pub use model::ModelTransform;
pub use starfield::StarField;
