pub mod posters;
pub mod recommendations;

pub use posters::{
    resolve_posters, CachedImageResolver, HttpImageResolver, ImageResolver,
    PassthroughImageResolver,
};
pub use recommendations::Recommender;
