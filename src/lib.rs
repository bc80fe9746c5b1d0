//! # IFC Bauzustand
//!
//! Compiles construction-phase smartviews from IFC models.
//!
//! ## Features
//!
//! - Read IFC STEP files (IFC2x3, IFC4 and IFC4x3 schemas)
//! - Collect phase tags from construction and demolition properties
//! - Generate one smartview per phase, colouring existing, new, demolished
//!   and future elements
//! - Export the property set catalog to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use ifc_bauzustand::model::Attribution;
//! use ifc_bauzustand::session::{RunRequest, Session};
//! use ifc_bauzustand::smartview::Provenance;
//!
//! let mut session = Session::new();
//! session.add_file("model.ifc")?;
//!
//! let request = RunRequest {
//!     output: Some("phases.bcsv".into()),
//!     attribution: Attribution::Standard,
//!     title: None,
//! };
//! let summary = session.run(&request, &Provenance::current())?;
//! println!("{} views written to {}", summary.views, summary.output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod phase;
pub mod session;
pub mod smartview;
