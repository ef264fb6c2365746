//! PT Node Taxonomy (C2), §3.2.
//!
//! The closed set of polymorphic node variants produced by the factory
//! (`crate::factory`) and consumed by a downstream elaborator or
//! pretty-printer. Every node family is a Rust `enum`/`struct` with total
//! accessors: an operation not applicable to a variant returns its
//! documented neutral value instead of panicking (§4.2).

pub mod container;
pub mod decl;
pub mod expr;
pub mod io;
pub mod item;
pub mod misc;
pub mod stmt;

pub use container::{PtModule, PtPort, PtUdp, PtUdpEntry};
pub use decl::{PtDeclHead, PtDeclItem};
pub use expr::PtExpr;
pub use io::{PtIOHead, PtIOItem};
pub use item::PtItem;
pub use misc::{PtAttrInst, PtAttrSpec, PtControl, PtDelay, PtNameBranch, PtPathDecl, PtRange, PtStrength};
pub use stmt::{PtCaseItem, PtStmt};
