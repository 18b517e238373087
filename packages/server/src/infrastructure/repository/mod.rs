//! Repository 実装
//!
//! 現在は InMemory 実装のみ。プロセス再起動で全状態が消える
//! （デモ用途として仕様どおり。永続化はスコープ外）。

pub mod inmemory;

pub use inmemory::InMemoryBoardRepository;
