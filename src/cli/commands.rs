//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rosetint")]
#[command(about = "Personal Markdown blog with a local data store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Blog data directory (default: $ROSETINT_ROOT or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the blog data directory
    Init,

    /// Create, list and edit posts
    #[command(subcommand)]
    Post(PostCommand),

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage the image library
    #[command(subcommand)]
    Image(ImageCommand),

    /// View or modify settings and labels
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Render a post as an HTML page
    Render {
        /// Post id
        id: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a post's table of contents
    Toc {
        /// Post id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create an empty draft
    New {
        /// Category id (default: first category)
        #[arg(short, long)]
        category: Option<String>,

        /// Title (default: the untitledDraft label)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List posts
    List {
        /// Only posts in this category id
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive search over title and content
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by: title, created, updated
        #[arg(long, default_value = "created")]
        sort: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Print a post's Markdown source
    Show {
        /// Post id
        id: String,
    },

    /// Edit a post's body in $EDITOR
    Edit {
        /// Post id
        id: String,
    },

    /// Change a post's title, category or body
    Set {
        /// Post id
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Category id
        #[arg(long)]
        category: Option<String>,

        /// Replace the body with this file's contents
        #[arg(long, value_name = "FILE")]
        content_file: Option<PathBuf>,
    },

    /// Append a stored image to a post's body
    InsertImage {
        /// Post id
        id: String,

        /// Image id
        image: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Add a category (existing names are reused)
    Add { name: String },

    /// Rename a category
    Rename { id: String, name: String },

    /// List categories with post counts
    List,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Import image files or directories of images
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List images and whether posts reference them
    List,

    /// Delete every image no post references
    Cleanup,

    /// Set the background image (omit the id to clear)
    Background { id: Option<String> },

    /// Set the lock-screen image (omit the id to clear)
    Lock { id: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// List all settings
    List,

    /// Get one setting
    Get { key: String },

    /// Set one setting
    Set { key: String, value: String },
}
