//! Flag types for tree nodes.

bitflags::bitflags! {
    /// Flags for tree nodes and tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const NONE                = 0;
        /// The parser had to recover inside this node: one of its tokens is
        /// missing or one of its slots holds an error node.
        const THIS_NODE_HAS_ERROR = 1 << 0;
        /// Zero-width token synthesized by the parser in place of an
        /// expected one.
        const MISSING             = 1 << 1;
    }
}
