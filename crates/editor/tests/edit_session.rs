//! End-to-end gesture flows: session → batch → store → tick refresh.

use std::sync::Arc;

use parking_lot::Mutex;

use waygrid_core::{Batch, CellCoordinates, CellKind, PathgridData, Point, RecordId, WorldPoint};
use waygrid_editor::wireframe::HIGHLIGHT_RADIUS;
use waygrid_editor::{EditSession, SceneGroup};
use waygrid_store::{DocumentStore, MemoryStore};

fn record() -> RecordId {
    RecordId::from("cell-0-0")
}

fn setup(data: PathgridData) -> (Arc<MemoryStore>, EditSession<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.insert_record_with(record(), CellKind::Interior, data);
    let scene = Arc::new(Mutex::new(SceneGroup::default()));
    let session = EditSession::new(store.clone(), scene, record(), CellCoordinates::new(0, 0));
    (store, session)
}

fn grid(points: usize) -> PathgridData {
    PathgridData {
        points: (0..points)
            .map(|i| Point::new(i as i32 * 64, 0, 0))
            .collect(),
        edges: Vec::new(),
    }
}

#[test]
fn point_insert_gesture_reaches_the_next_frame() {
    let (store, mut session) = setup(grid(1));

    let mut batch = Batch::new();
    session.add_point(&mut batch, WorldPoint::new(32.0, 48.0, 0.0));
    store.submit(batch).unwrap();
    session.notify_record_changed();
    session.update();

    let anchor = session.anchor();
    let node = anchor.graph_node().lock();
    let wireframe = node.drawable().expect("graph wireframe built");
    // Two points: one center vertex plus six marker vertices each.
    assert_eq!(wireframe.vertices().len(), 2 * 7);
}

#[test]
fn external_deletion_discards_geometry_on_next_tick() {
    let (store, mut session) = setup(grid(2));
    session.update();
    assert!(session.anchor().graph_node().lock().drawable().is_some());

    store.remove_record(&record());
    session.notify_record_changed();
    session.update();

    assert!(session.anchor().graph_node().lock().drawable().is_none());
    assert!(session.anchor().selection_node().lock().drawable().is_none());
}

#[test]
fn external_undo_brings_the_record_back() {
    let (store, mut session) = setup(grid(0));

    let mut batch = Batch::new();
    session.add_point(&mut batch, WorldPoint::new(10.0, 20.0, 30.0));
    store.submit(batch).unwrap();

    store.undo().unwrap();
    session.notify_record_changed();
    session.update();
    {
        let node = session.anchor().graph_node().lock();
        assert!(node.drawable().unwrap().vertices().is_empty());
    }

    store.redo().unwrap();
    session.notify_record_changed();
    session.update();
    let node = session.anchor().graph_node().lock();
    assert_eq!(node.drawable().unwrap().vertices().len(), 7);
}

#[test]
fn indicator_highlight_draws_last_regardless_of_selection_order() {
    let (_store, mut session) = setup(grid(4));

    // Select {k, m} with k = 2 toggled first, then pin k as the indicator.
    session.toggle_selected(2);
    session.toggle_selected(3);
    session.set_connection_indicator(2);
    session.update();

    let anchor = session.anchor();
    let node = anchor.selection_node().lock();
    let highlight = node.drawable().expect("selection wireframe built");
    // Two markers, six vertices each; the last marker's apex sits over
    // node 2 at (128, 0, 0).
    assert_eq!(highlight.vertices().len(), 12);
    let last_apex = highlight.vertices()[6];
    assert_eq!(last_apex.x, 128.0);
    assert_eq!(last_apex.z, HIGHLIGHT_RADIUS);
}

#[test]
fn selection_mutations_do_not_touch_the_store() {
    let (store, mut session) = setup(grid(3));
    let before = store.resolve(&record()).unwrap();

    session.select_all();
    session.toggle_selected(1);
    session.invert_selected();
    session.clear_selected();

    assert_eq!(store.resolve(&record()).unwrap(), before);
    assert_eq!(store.undo_depth(), 0);
}

#[test]
fn full_edit_round_trip_is_undoable_per_gesture() {
    let (store, mut session) = setup(grid(0));

    // Gesture 1: two points.
    let mut batch = Batch::new();
    session.add_point(&mut batch, WorldPoint::new(0.0, 0.0, 0.0));
    store.submit(batch).unwrap();
    let mut batch = Batch::new();
    session.add_point(&mut batch, WorldPoint::new(100.0, 0.0, 0.0));
    store.submit(batch).unwrap();

    // Gesture 2: connect them.
    let mut batch = Batch::new();
    session.add_edge(&mut batch, 0, 1);
    store.submit(batch).unwrap();
    assert_eq!(store.resolve(&record()).unwrap().edge_count(), 2);

    // Gesture 3: remove both points.
    session.select_all();
    let mut batch = Batch::new();
    session.remove_selected_points(&mut batch);
    store.submit(batch).unwrap();
    assert_eq!(store.resolve(&record()).unwrap().point_count(), 0);

    // Undo unwinds gesture by gesture.
    store.undo().unwrap();
    assert_eq!(store.resolve(&record()).unwrap().point_count(), 2);
    store.undo().unwrap();
    assert_eq!(store.resolve(&record()).unwrap().edge_count(), 0);
}

#[test]
fn dropping_a_session_detaches_its_overlay() {
    let store = Arc::new(MemoryStore::new());
    store.insert_record(record(), CellKind::Interior);
    let scene = Arc::new(Mutex::new(SceneGroup::default()));

    {
        let _session = EditSession::new(
            store.clone(),
            scene.clone(),
            record(),
            CellCoordinates::new(0, 0),
        );
        assert_eq!(scene.lock().len(), 2);
    }
    assert!(scene.lock().is_empty());
}
