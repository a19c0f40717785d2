//! Askama templates for the documents and snippets produced by exports.

pub mod views;
