use system::serde_json::json;
use system::{CanvasSnapshot, ClientEvent, ConnectionId, EngineConfig, ServerEvent, SyncEngine};

fn draw(room: &str, canvas: &str, payload: system::serde_json::Value) -> ClientEvent {
    ClientEvent::Draw {
        room_id: room.into(),
        canvas_id: canvas.into(),
        drawing: payload,
    }
}

fn join(room: &str) -> ClientEvent {
    ClientEvent::JoinRoom(room.into())
}

fn join_snapshot(engine: &mut SyncEngine, from: ConnectionId, room: &str) -> Vec<CanvasSnapshot> {
    let out = engine.handle_event(from, join(room));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to, vec![from]);
    match out.into_iter().next().map(|o| o.event) {
        Some(ServerEvent::LoadRoomCanvases(snapshot)) => snapshot,
        other => panic!("expected load-room-canvases, got {:?}", other),
    }
}

#[test]
fn it_sends_full_state_to_joiner() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(
        p1,
        ClientEvent::NewCanvas {
            room_id: "r".into(),
            id: "c".into(),
        },
    );
    engine.handle_event(p1, draw("r", "c", json!({"stroke": 1})));

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    assert_eq!(
        snapshot,
        vec![CanvasSnapshot {
            id: "c".into(),
            drawings: vec![json!({"stroke": 1})],
            text_areas: vec![],
        }]
    );
}

#[test]
fn it_broadcasts_draw_to_others_and_creation_to_everyone() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    let p2 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(p2, join("r"));

    let out = engine.handle_event(p1, draw("r", "c", json!(1)));
    assert_eq!(out[0].to, vec![p2]);

    let out = engine.handle_event(
        p1,
        ClientEvent::NewCanvas {
            room_id: "r".into(),
            id: "c2".into(),
        },
    );
    assert_eq!(out[0].to, vec![p1, p2]);
    assert_eq!(out[0].event, ServerEvent::NewCanvas { id: "c2".into() });
}

#[test]
fn it_creates_canvases_idempotently() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(p1, draw("r", "c", json!(1)));
    engine.handle_event(
        p1,
        ClientEvent::NewCanvas {
            room_id: "r".into(),
            id: "c".into(),
        },
    );
    engine.handle_event(
        p1,
        ClientEvent::NewCanvas {
            room_id: "r".into(),
            id: "c".into(),
        },
    );

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].drawings, vec![json!(1)]);
}

#[test]
fn it_clears_content_but_keeps_the_canvas() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(p1, draw("r", "c", json!(1)));
    engine.handle_event(
        p1,
        ClientEvent::TextUpdate {
            room_id: "r".into(),
            canvas_id: "c".into(),
            text_areas: vec![json!("t")],
        },
    );
    engine.handle_event(
        p1,
        ClientEvent::ClearCanvas {
            room_id: "r".into(),
            canvas_id: "c".into(),
        },
    );

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    assert_eq!(
        snapshot,
        vec![CanvasSnapshot {
            id: "c".into(),
            drawings: vec![],
            text_areas: vec![],
        }]
    );
}

#[test]
fn it_deletes_a_canvas_without_leaving_residue() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(p1, draw("r", "c", json!("old")));
    engine.handle_event(
        p1,
        ClientEvent::DeleteCanvas {
            room_id: "r".into(),
            canvas_id: "c".into(),
        },
    );

    assert!(engine.registry().room_snapshot(&"r".to_string()).is_empty());

    // a later draw recreates the canvas fresh
    engine.handle_event(p1, draw("r", "c", json!("new")));
    let snapshot = engine.registry().room_snapshot(&"r".to_string());
    assert_eq!(snapshot[0].drawings, vec![json!("new")]);
}

#[test]
fn it_reclaims_an_emptied_room() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(p1, draw("r", "c", json!(1)));

    engine.disconnect(p1);
    assert!(engine.registry().room_snapshot(&"r".to_string()).is_empty());

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    assert!(snapshot.is_empty());
}

#[test]
fn it_replaces_text_areas_instead_of_merging() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    engine.handle_event(
        p1,
        ClientEvent::TextUpdate {
            room_id: "r".into(),
            canvas_id: "c".into(),
            text_areas: vec![json!("t1")],
        },
    );
    engine.handle_event(
        p1,
        ClientEvent::TextUpdate {
            room_id: "r".into(),
            canvas_id: "c".into(),
            text_areas: vec![json!("t2"), json!("t3")],
        },
    );

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    assert_eq!(snapshot[0].text_areas, vec![json!("t2"), json!("t3")]);
}

#[test]
fn it_leaves_the_previous_room_on_cross_room_join() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("first"));
    engine.handle_event(p1, draw("first", "c", json!(1)));

    engine.handle_event(p1, join("second"));

    // the first room lost its only member and was reclaimed with its state
    assert!(engine.registry().room(&"first".to_string()).is_none());
    assert_eq!(engine.registry().members(&"second".to_string()), &[p1]);
}

#[test]
fn it_keeps_snapshot_order_deterministic() {
    let mut engine = SyncEngine::new(EngineConfig::default());
    let p1 = engine.connect();
    engine.handle_event(p1, join("r"));
    for id in &["alpha", "omega", "beta"] {
        engine.handle_event(
            p1,
            ClientEvent::NewCanvas {
                room_id: "r".into(),
                id: (*id).into(),
            },
        );
    }

    let p2 = engine.connect();
    let snapshot = join_snapshot(&mut engine, p2, "r");
    let ids: Vec<&str> = snapshot.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "omega", "beta"]);
}
