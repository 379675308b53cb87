//! Integration tests for whole games played through the command handlers.
//!
//! Everything runs in-process: the store is an in-memory key-value store and
//! the broadcast topic lives in an in-memory broker.

use connect_four_live::adapters::broker::InMemoryBroker;
use connect_four_live::application::{
    CreateGameCommand, DeleteGameCommand, DropPieceCommand, GameError, GetGameStatusQuery,
    JoinGameCommand, LeaveGameCommand, StartGameCommand,
};
use connect_four_live::bootstrap::AppContext;
use connect_four_live::domain::foundation::SessionId;
use connect_four_live::domain::session::{
    GameEvent, Mark, Player, PlayerName, Session, SessionError, SLOTS,
};
use proptest::prelude::*;

const TOPIC: &str = "broadcast";

// =============================================================================
// Helpers
// =============================================================================

async fn seated_and_started() -> (AppContext, InMemoryBroker, SessionId) {
    let (context, broker) = AppContext::in_memory(TOPIC);
    let created = context
        .create_handler()
        .handle(CreateGameCommand::default())
        .await
        .unwrap();
    let id = created.session.id().clone();

    for name in ["Alice", "Bob"] {
        context
            .join_handler()
            .handle(JoinGameCommand {
                session_id: id.clone(),
                name: name.to_string(),
            })
            .await
            .unwrap();
    }
    context
        .start_handler()
        .handle(StartGameCommand {
            session_id: id.clone(),
        })
        .await
        .unwrap();
    (context, broker, id)
}

async fn play(
    context: &AppContext,
    id: &SessionId,
    name: &str,
    column: i32,
) -> Result<GameEvent, GameError> {
    context
        .drop_handler()
        .handle(DropPieceCommand {
            session_id: id.clone(),
            name: name.to_string(),
            column,
        })
        .await
        .map(|update| update.event)
}

async fn status(context: &AppContext, id: &SessionId) -> Session {
    context
        .status_handler()
        .handle(GetGameStatusQuery {
            session_id: id.clone(),
        })
        .await
        .unwrap()
        .session
}

// =============================================================================
// Full games
// =============================================================================

#[tokio::test]
async fn alice_wins_along_the_bottom_row() {
    let (context, broker, id) = seated_and_started().await;

    // Bob (O) opens the first game; his pieces never line up.
    let moves = [
        ("Bob", 6),
        ("Alice", 0),
        ("Bob", 6),
        ("Alice", 1),
        ("Bob", 5),
        ("Alice", 2),
        ("Bob", 5),
    ];
    for (name, column) in moves {
        let event = play(&context, &id, name, column).await.unwrap();
        assert!(matches!(event, GameEvent::PieceDropped { .. }));
    }

    let last = play(&context, &id, "Alice", 3).await.unwrap();
    assert!(matches!(last, GameEvent::GameWon { ref winner, column: 3 } if winner.as_str() == "Alice"));

    let session = status(&context, &id).await;
    assert!(!session.status());
    assert_eq!(session.players()[0].wins(), 1);
    assert_eq!(session.players()[1].wins(), 0);
    assert_eq!(session.occupied_slots(), 8);
    for col in 0..4 {
        assert_eq!(session.grid().cell(5, col), Some(Mark::First));
    }

    // 2 joins, 1 start, 8 moves, all on this session's key
    let records = broker.records(TOPIC);
    assert_eq!(records.len(), 11);
    assert!(records.iter().all(|(key, _)| key == id.as_str()));
    assert!(records[10].1.starts_with("Alice dropped a piece in column 4 and connected four!"));

    // no further moves once the game is over
    let err = play(&context, &id, "Bob", 0).await.unwrap_err();
    assert!(matches!(err, GameError::Session(SessionError::GameNotStarted)));
}

#[tokio::test]
async fn full_board_without_a_line_is_a_draw() {
    let (context, _broker, id) = seated_and_started().await;

    // Leaves the board as (top to bottom):
    //   OXOXOXX
    //   XOOOXOO
    //   XXXOXXX
    //   XXOOXXO
    //   OXOXOXX
    //   OOOXOOO
    let columns = [
        5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4, 2, 3,
        2, 6, 0, 4, 1, 1, 5, 4, 4, 5, 6, 6,
    ];
    assert_eq!(columns.len(), SLOTS);

    let mut events = Vec::new();
    for (index, column) in columns.into_iter().enumerate() {
        let name = if index % 2 == 0 { "Bob" } else { "Alice" };
        events.push(play(&context, &id, name, column).await.unwrap());
    }

    assert!(events[..SLOTS - 1]
        .iter()
        .all(|e| matches!(e, GameEvent::PieceDropped { .. })));
    assert!(matches!(events[SLOTS - 1], GameEvent::GameDrawn { .. }));

    let session = status(&context, &id).await;
    assert!(!session.status());
    assert!(session.is_full());
    assert!(session.players().iter().all(|p| p.wins() == 0));
}

#[tokio::test]
async fn rematch_gives_the_other_seat_the_first_move() {
    let (context, _broker, id) = seated_and_started().await;

    // Bob moves first in game one
    let err = play(&context, &id, "Alice", 0).await.unwrap_err();
    assert!(matches!(err, GameError::Session(SessionError::NotYourTurn { .. })));

    // no restart mid-game
    context
        .start_handler()
        .handle(StartGameCommand {
            session_id: id.clone(),
        })
        .await
        .unwrap_err();

    // finish quickly: Bob stacks column 0, Alice column 1
    for _ in 0..3 {
        play(&context, &id, "Bob", 0).await.unwrap();
        play(&context, &id, "Alice", 1).await.unwrap();
    }
    let won = play(&context, &id, "Bob", 0).await.unwrap();
    assert!(matches!(won, GameEvent::GameWon { .. }));

    let restarted = context
        .start_handler()
        .handle(StartGameCommand {
            session_id: id.clone(),
        })
        .await
        .unwrap();
    assert!(matches!(restarted.event, GameEvent::GameStarted { ref first } if first.as_str() == "Alice"));
    assert_eq!(restarted.session.occupied_slots(), 0);
    assert_eq!(restarted.session.players()[1].wins(), 1);
}

#[tokio::test]
async fn rejected_moves_leave_state_and_topic_untouched() {
    let (context, broker, id) = seated_and_started().await;
    let before = status(&context, &id).await;
    let published = broker.records(TOPIC).len();

    for column in [-1, 7] {
        let err = play(&context, &id, "Bob", column).await.unwrap_err();
        assert!(matches!(err, GameError::Session(SessionError::OutOfRange { .. })));
    }
    let err = play(&context, &id, "Carol", 0).await.unwrap_err();
    assert!(matches!(err, GameError::Session(SessionError::PlayerNotFound(_))));

    assert_eq!(status(&context, &id).await, before);
    assert_eq!(broker.records(TOPIC).len(), published);
}

#[tokio::test]
async fn seats_change_only_between_games() {
    let (context, _broker, id) = seated_and_started().await;

    let err = context
        .leave_handler()
        .handle(LeaveGameCommand {
            session_id: id.clone(),
            name: "Alice".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::Session(SessionError::GameInProgress)));

    let err = context
        .join_handler()
        .handle(JoinGameCommand {
            session_id: id.clone(),
            name: "Carol".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::Session(SessionError::GameInProgress)));
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let (context, _broker, id) = seated_and_started().await;

    context
        .delete_handler()
        .handle(DeleteGameCommand {
            session_id: id.clone(),
        })
        .await
        .unwrap();

    let err = context
        .status_handler()
        .handle(GetGameStatusQuery {
            session_id: id.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::SessionNotFound(_)));

    let err = play(&context, &id, "Bob", 0).await.unwrap_err();
    assert!(matches!(err, GameError::SessionNotFound(_)));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn occupied_slots_matches_the_grid(columns in proptest::collection::vec(-2i32..9, 0..60)) {
        let mut session = Session::create(SessionId::parse("prop").unwrap());
        for name in ["Alice", "Bob"] {
            session.add_player(Player::new(PlayerName::new(name).unwrap())).unwrap();
        }
        session.start().unwrap();

        for column in columns {
            let before = session.clone();
            match session.play_turn(column) {
                Ok(_) => {}
                Err(SessionError::GameNotStarted) => break,
                Err(_) => prop_assert_eq!(&session, &before),
            }
            prop_assert_eq!(session.occupied_slots() as usize, session.grid().occupied());
            prop_assert!(session.occupied_slots() as usize <= SLOTS);
        }
    }
}
