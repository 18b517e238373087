//! InMemory Repository 実装

pub mod board;

pub use board::InMemoryBoardRepository;
