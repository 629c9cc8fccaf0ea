//! Material path resolution and batch descriptor rewriting

pub mod batch;
pub mod resolver;

pub use batch::{MaterialFixReport, collect_material_dirs, find_material_descriptors, fix_materials};
pub use resolver::{MaterialLocation, ResolvedTextures, ResolverConfig, base_name, resolve};
