//! Level 4: Session Tests
//!
//! Multi-frame editing through the session handle, with link rows bound to a
//! Slint model.

mod common;

use common::harness::StackHarness;
use slint::{Color, Model, VecModel};
use stack_node_graph::{apply_frame, FrameEvents, GraphStore, LinkInteraction, LinkRow, PinKind};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct LinkData {
    id: i32,
    start_pin_id: i32,
    end_pin_id: i32,
    color: Color,
}

fn to_link_data(row: &LinkRow) -> LinkData {
    LinkData {
        id: row.id.get() as i32,
        start_pin_id: row.input.get() as i32,
        end_pin_id: row.output.get() as i32,
        color: row.color,
    }
}

#[test]
fn test_bound_model_follows_frames() {
    let h = StackHarness::new();
    let model = Rc::new(VecModel::<LinkData>::default());
    h.session.bind_link_model(model.clone(), to_link_data);
    assert_eq!(model.row_count(), 0);

    let a = h.connect(h.disk_in, h.base_out).created[0];
    let b = h.connect(h.systemd_in, h.base_out).created[0];
    assert_eq!(model.row_count(), 2);

    h.delete(a);

    assert_eq!(model.row_count(), 1);
    let row = model.row_data(0).unwrap();
    assert_eq!(row.id, b.get() as i32);
    assert_eq!(row.start_pin_id, h.systemd_in.get() as i32);
}

#[test]
fn test_link_color_applies_to_rows() {
    let h = StackHarness::new();
    let model = Rc::new(VecModel::<LinkData>::default());
    h.session.bind_link_model(model.clone(), to_link_data);
    h.connect(h.disk_in, h.base_out);

    h.session.set_link_color(Color::from_rgb_u8(100, 180, 255));

    assert_eq!(model.row_data(0).unwrap().color, Color::from_rgb_u8(100, 180, 255));
}

#[test]
fn test_draw_then_frame_matches_rows() {
    let h = StackHarness::new();
    h.connect(h.disk_in, h.base_out);
    h.connect(h.systemd_in, h.base_out);

    let mut frame = FrameEvents::new();
    h.session.draw(&mut frame);
    h.session.frame(&mut frame);

    let drawn: Vec<_> = frame.drawn().iter().map(|d| d.id).collect();
    let rows: Vec<_> = h.session.link_rows().iter().map(|r| r.id).collect();
    assert_eq!(drawn, rows);
}

#[test]
fn test_components_added_mid_session_can_be_linked() {
    let h = StackHarness::new();
    let chromium = h.session.add_component("Chromium").unwrap();
    let chromium_in = h.session.with_graph(|g| g.node(chromium).unwrap().pins[0]);

    let report = h.connect(h.systemd_out, chromium_in);

    assert!(report.changed_graph());
    assert_eq!(h.session.with_graph(|g| g.links_attached_to(chromium)).len(), 1);
    assert_eq!(h.session.with_graph(|g| g.links_attached_to(h.disk)).len(), 0);
}

#[test]
fn test_frames_as_values() {
    let interaction = LinkInteraction::default();
    let mut graph = GraphStore::default();
    let a = graph.add_node("A", [PinKind::Output]);
    let b = graph.add_node("B", [PinKind::Input]);
    let out = graph.node(a).unwrap().pins[0];
    let inp = graph.node(b).unwrap().pins[0];

    let frames = vec![
        FrameEvents::new().drag_from(out),
        FrameEvents::new().drag(out, inp),
        FrameEvents::new().drag(out, inp).release(),
        FrameEvents::new(),
    ];
    let mut created = Vec::new();
    for frame in frames {
        let (next, report) = apply_frame(graph, &interaction, frame);
        graph = next;
        created.extend(report.created);
    }

    assert_eq!(created.len(), 1);
    assert_eq!(graph.links()[0].id, created[0]);
}
