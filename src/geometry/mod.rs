//! Shape outlines, link routing and path descriptors

pub mod defaults;
pub mod path_data;
pub mod paths;
pub mod shapes;
pub mod text;

pub use path_data::{Arc, PathCommand, PathData};
pub use paths::{Line, LinkPath, PathKind};
pub use shapes::{Circle, NodeShape, Rect, Shape};
pub use text::{ContainerSize, MonospaceMetrics, TextMetrics};
