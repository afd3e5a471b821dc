pub mod attributes;
pub mod outfit;

pub use attributes::{AttributeExtractor, RemoteAttributeExtractor};
pub use outfit::OutfitService;
