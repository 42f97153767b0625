//! Pure domain services.

mod variant_resolver;

pub use variant_resolver::VariantResolver;
