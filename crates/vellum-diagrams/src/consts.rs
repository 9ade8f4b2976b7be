//! Client-side script locations for diagram rendering.

/// Mermaid bundle loaded on every page when the extension is enabled.
pub const MERMAID_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Inline script starting Mermaid once the bundle has loaded.
pub const MERMAID_INIT_SCRIPT: &str = "mermaid.initialize({ startOnLoad: true })";
