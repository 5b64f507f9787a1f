//! Page output.
//!
//! - [`html`]: renders the merged items into the static page and writes it
//!
//! ```text
//! public/
//! └── index.html
//! ```

pub mod html;
