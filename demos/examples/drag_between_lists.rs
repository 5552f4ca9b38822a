// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving rows between two lists and a trash bin.
//!
//! This example shows how to:
//! - compose draggable rows and droppable containers into one view type,
//! - host them in a [`Scene`] and drive a [`DragController`] with scripted pointer events,
//! - react to the negotiated effect once the session ends.
//!
//! Run with logging to see every hook and session transition:
//! - `RUST_LOG=debug cargo run -p understory_drag_demos --example drag_between_lists`

use kurbo::{Point, Rect};
use understory_drag::adapters::arena::ViewKey;
use understory_drag::adapters::scene::Scene;
use understory_drag::{
    DragController, DragData, DragPayload, DragSession, DragView, Draggable, DropEffect,
    DropEffects, Droppable, HookError, HookResult, ReleaseOutcome,
};

const ROW_TYPE: &str = "application/x-understory-row";

struct Row {
    label: String,
    /// Set when the row was moved out and should be removed from its list.
    moved_out: bool,
}

impl Draggable<ViewKey> for Row {
    fn payload(&self) -> DragPayload {
        DragPayload::new()
            .with_text("text/plain", self.label.clone())
            .with(ROW_TYPE, DragData::Bytes(self.label.as_bytes().to_vec()))
    }

    fn allowed_effects(&self) -> DropEffects {
        DropEffects::MOVE | DropEffects::COPY
    }

    fn drag_started(&mut self, session: &DragSession<ViewKey>) -> HookResult {
        log::info!("row {:?}: drag {} started", self.label, session.id().get());
        Ok(())
    }

    fn drag_ended(&mut self, session: &DragSession<ViewKey>) -> HookResult {
        log::info!("row {:?}: ended with {}", self.label, session.current_effect());
        self.moved_out = session.current_effect() == DropEffect::Move;
        Ok(())
    }
}

struct List {
    name: &'static str,
    accepts: Vec<String>,
    items: Vec<String>,
    highlighted: bool,
}

impl Droppable<ViewKey> for List {
    fn accepted_types(&self) -> &[String] {
        &self.accepts
    }

    fn accepted_effects(&self) -> DropEffects {
        DropEffects::MOVE | DropEffects::COPY
    }

    fn drop_entered(&mut self, _session: &DragSession<ViewKey>) -> HookResult {
        self.highlighted = true;
        log::info!("list {}: highlight on", self.name);
        Ok(())
    }

    fn drop_left(&mut self, _session: &DragSession<ViewKey>) -> HookResult {
        self.highlighted = false;
        log::info!("list {}: highlight off", self.name);
        Ok(())
    }

    fn drop_accepted(&mut self, session: &DragSession<ViewKey>) -> HookResult {
        let text = session
            .payload()
            .get("text/plain")
            .and_then(DragData::as_text)
            .ok_or_else(|| HookError::new("payload has no text"))?;
        self.items.push(text.to_owned());
        Ok(())
    }
}

struct Trash {
    accepts: Vec<String>,
    shredded: usize,
}

impl Droppable<ViewKey> for Trash {
    fn accepted_types(&self) -> &[String] {
        &self.accepts
    }

    fn accepted_effects(&self) -> DropEffects {
        DropEffects::MOVE
    }

    fn drop_accepted(&mut self, _session: &DragSession<ViewKey>) -> HookResult {
        self.shredded += 1;
        Ok(())
    }
}

enum Widget {
    Row(Row),
    List(List),
    Trash(Trash),
}

impl DragView<ViewKey> for Widget {
    fn as_draggable(&mut self) -> Option<&mut dyn Draggable<ViewKey>> {
        match self {
            Self::Row(row) => Some(row),
            _ => None,
        }
    }

    fn as_droppable(&mut self) -> Option<&mut dyn Droppable<ViewKey>> {
        match self {
            Self::List(list) => Some(list),
            Self::Trash(trash) => Some(trash),
            Self::Row(_) => None,
        }
    }
}

fn list(name: &'static str) -> Widget {
    Widget::List(List {
        name,
        accepts: vec!["text/plain".to_owned()],
        items: Vec::new(),
        highlighted: false,
    })
}

fn row(label: &str) -> Widget {
    Widget::Row(Row {
        label: label.to_owned(),
        moved_out: false,
    })
}

fn row_bounds(index: usize) -> Rect {
    let y = 10.0 + 30.0 * index as f64;
    Rect::new(10.0, y, 190.0, y + 25.0)
}

/// Remove rows whose drag ended with a move.
fn collect_moved(scene: &mut Scene<Widget>, drag: &mut DragController<ViewKey>, rows: &mut Vec<ViewKey>) {
    rows.retain(|key| {
        let moved = matches!(scene.get(*key), Some(Widget::Row(r)) if r.moved_out);
        if moved {
            drag.view_detached(scene, *key);
            scene.remove(*key);
        }
        !moved
    });
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = Scene::new();
    let inbox = scene.insert(list("inbox"), Rect::new(0.0, 0.0, 200.0, 300.0), 0);
    let archive = scene.insert(list("archive"), Rect::new(250.0, 0.0, 450.0, 300.0), 0);
    let trash = scene.insert(
        Widget::Trash(Trash {
            accepts: vec![ROW_TYPE.to_owned()],
            shredded: 0,
        }),
        Rect::new(500.0, 0.0, 600.0, 100.0),
        0,
    );
    let mut rows: Vec<ViewKey> = ["alpha", "beta", "gamma"]
        .iter()
        .enumerate()
        .map(|(i, label)| scene.insert(row(label), row_bounds(i), 1))
        .collect();

    let mut drag = DragController::new();

    println!("== Move alpha to the archive ==");
    drag.pointer_down(&mut scene, None, rows[0], Point::new(20.0, 20.0));
    drag.pointer_move(&mut scene, None, Point::new(120.0, 40.0));
    drag.pointer_move(&mut scene, None, Point::new(300.0, 50.0));
    let outcome = drag.pointer_up(&mut scene, None, Point::new(300.0, 50.0));
    println!("{outcome:?}");
    collect_moved(&mut scene, &mut drag, &mut rows);

    println!("\n== Drag beta over the trash, then cancel ==");
    drag.pointer_down(&mut scene, None, rows[0], Point::new(20.0, 50.0));
    drag.pointer_move(&mut scene, None, Point::new(550.0, 50.0));
    if let Some(session) = drag.session() {
        println!(
            "hovering {:?}, target {:?}, effect {}",
            session.hover_stack(),
            session.target(),
            session.current_effect()
        );
    }
    println!("cancelled {:?}", drag.cancel(&mut scene));
    drag.pointer_up(&mut scene, None, Point::new(550.0, 50.0));

    println!("\n== Click gamma ==");
    drag.pointer_down(&mut scene, None, rows[1], Point::new(20.0, 80.0));
    drag.pointer_move(&mut scene, None, Point::new(22.0, 81.0));
    let outcome = drag.pointer_up(&mut scene, None, Point::new(22.0, 81.0));
    if let ReleaseOutcome::Click(view) = outcome {
        println!("clicked {view:?}");
    }

    println!("\n== Shred beta ==");
    drag.pointer_down(&mut scene, None, rows[0], Point::new(20.0, 50.0));
    drag.pointer_move(&mut scene, None, Point::new(550.0, 50.0));
    let outcome = drag.pointer_up(&mut scene, None, Point::new(550.0, 50.0));
    println!("{outcome:?}");
    collect_moved(&mut scene, &mut drag, &mut rows);

    println!("\n== Final state ==");
    for key in [inbox, archive] {
        if let Some(Widget::List(l)) = scene.get(key) {
            println!("{}: {:?} (highlighted: {})", l.name, l.items, l.highlighted);
        }
    }
    if let Some(Widget::Trash(t)) = scene.get(trash) {
        println!("trash: {} shredded", t.shredded);
    }
    println!("rows left: {}", rows.len());
    for err in drag.drain_diagnostics() {
        println!("diagnostic: {err}");
    }
}
