//! ドメイン層
//!
//! 緊急アラートのドメインモデル（エンティティ・値オブジェクト）と、
//! ドメイン層が必要とするインターフェース（Repository, MessagePusher）を定義します。
//! この層は I/O を持たず、Infrastructure 層には依存しません。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ActiveUser, Alert, AlertBoard, DisasterMode, TrafficSimulation};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::BoardRepository;
pub use value_object::{
    AlertId, AlertIdFactory, Location, MapViewMode, Resolution, Severity, Timestamp,
    TrafficSimPatch, UserId,
};
