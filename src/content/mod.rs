//! Content module - post, tag and author models

mod post;

pub use post::{Author, Post, Tag, TagCount};
