//! IIIF Content State
//!
//! Encode and decode IIIF content states: annotations that point a viewer at
//! a Manifest, Canvas, Range or Collection and travel inside links as an
//! `iiif-content` query parameter.
//!
//! # Modules
//!
//! - `annotation`: Content state model, shorthand expansion, validation and
//!   manifest extraction
//! - `codec`: Token encoding (URI escape + unpadded base64url)
//! - `resolver`: Fetching and classifying content states given as URLs
//! - `link`: Entry points for links, tokens and URLs
//!
//! # Usage
//!
//! ```ignore
//! use iiif_content_state::{encode_link, parse_link, Annotation, Target};
//!
//! let annotation = Annotation::new(Target::canvas(
//!     "https://example.org/iiif/item1/canvas37",
//!     "https://example.org/iiif/item1/manifest",
//! ));
//! let link = encode_link("https://viewer.example.com/", &annotation)?;
//!
//! let state = parse_link(&link).await?;
//! assert_eq!(state.manifests, vec!["https://example.org/iiif/item1/manifest"]);
//! ```

pub mod annotation;
pub mod codec;
pub mod config;
pub mod error;
pub mod link;
pub mod resolver;

pub use annotation::{Annotation, OneOrMany, PartOf, Target, TargetType, PRESENTATION_3_CONTEXT};
pub use codec::{decode_content_state, encode_content_state, encode_content_state_str};
pub use config::ResolverConfig;
pub use error::{ContentStateError, Error, Result};
pub use link::{
    encode_link, parse_content_state, parse_link, ContentState, ContentStateParser,
    CONTENT_STATE_PARAM,
};
pub use resolver::{HttpResolver, ResourceResolver};
