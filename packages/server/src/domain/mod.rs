//! ドメイン層
//!
//! セッションの状態（Roster, AnswerLedger, 進行中の Question）と
//! そのビジネスルールを持つ層。外部との通信（WebSocket, タイマー）は
//! trait として定義し、具体的な実装は Infrastructure 層が提供する。

mod answer_ledger;
mod countdown;
mod entity;
mod error;
mod gateway;
mod notification;
mod results;
mod roster;
mod session;
mod value_object;

pub use answer_ledger::{AnswerLedger, AnswerSet};
pub use countdown::{CountdownObserver, CountdownScheduler};
pub use entity::{Participant, Question};
pub use error::ValidationError;
pub use gateway::{BroadcastGateway, GatewayChannel, GatewayError};
pub use notification::Notification;
pub use results::{OptionTally, aggregate};
pub use roster::Roster;
pub use session::{OpenQuestion, SequenceCounter, Session, SessionHandle};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DisplayName, QuestionId, Role, Timestamp,
};
