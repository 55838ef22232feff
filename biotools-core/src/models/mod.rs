pub mod gene_model;
pub mod gene_model_set;
pub mod interval;
pub mod strand;

// re-export for cleaner imports
pub use self::gene_model::{Exon, GeneModel};
pub use self::gene_model_set::GeneModelSet;
pub use self::interval::Interval;
pub use self::strand::Strand;
