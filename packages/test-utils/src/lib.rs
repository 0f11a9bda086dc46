mod datagen;

pub use datagen::*;
