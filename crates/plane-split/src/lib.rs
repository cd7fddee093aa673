//! Spatial partitioning of a polygon by a plane.
//!
//! A [`Polygon`] is a cycle of directed edges on its own support plane.
//! [`split`] cuts it with an arbitrary [`Plane`] into simple pieces collected
//! in three [`List`]s: above, on and below the cut. Boundaries that cross the
//! plane several times are bridged into separate loops.
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use plane_split::{split, List, Plane, Polygon};
//!
//! let square = Polygon::new(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]);
//! let cut = Plane::new(Vector3::new(1.0, 0.0, 0.0), -0.5);
//!
//! let (mut above, mut on, mut below) = (List::new(), List::new(), List::new());
//! split(square, &cut, &mut above, &mut on, &mut below);
//!
//! assert_eq!(above.len(), 1);
//! assert_eq!(below.len(), 1);
//! assert!(on.is_empty());
//! assert_eq!(above.peek().unwrap().n_points(), 4);
//! ```

mod config;
mod cut;
mod edge;
mod error;
mod list;
mod location;
mod plane;
mod polygon;

pub use config::{BelowRouting, SplitConfig};
pub use cut::{split, split_with_config, Partition};
pub use edge::{EdgeCycle, EdgeId, EdgeRef, Walk};
pub use error::PolygonError;
pub use list::{IntoIter, Iter, List};
pub use location::Where;
pub use plane::Plane;
pub use polygon::Polygon;
