//! Parent Form Example
//!
//! Creates a root form with a few pieces of content and a button that opens
//! a child form, then runs the event loop. The headless toolkit has no
//! display, so a couple of user actions are scripted before the loop starts.
//!
//! Run with: cargo run --example parent_form --features headless

use std::rc::Rc;

use formwork::headless::ToolkitCall;
use formwork::prelude::*;

fn main() {
    let toolkit = HeadlessToolkit::shared();

    let result = ApplicationBuilder::new()
        .with_title("parent")
        .with_size(500, 200)
        .run(toolkit.clone(), |form| {
            let (_, name) = form.add_entry("Name", Layout::default())?;
            let (_, color) =
                form.add_option_menu("Color", ["red", "green", "blue"], Layout::default())?;

            let parent = Rc::downgrade(form);
            let child_button = form.add_button(
                "generate child",
                Some(callback(move || {
                    let Some(parent) = parent.upgrade() else {
                        return;
                    };
                    match parent.generate_child(300, 300, "child") {
                        Ok(child) => {
                            let _ = child.add_label("I am a child form", Layout::default());
                        }
                        Err(err) => parent.message_box(&err.to_string(), "Error"),
                    }
                })),
                Layout::default(),
            )?;

            let status = Rc::downgrade(form);
            form.bind("<Control-s>", move || {
                if let Some(form) = status.upgrade() {
                    let _ = form.info(&format!("saved {} / {}", name.get(), color.get()));
                }
            })?;

            // Script a click and a save; the loop ends once the queue drains.
            let mut toolkit = toolkit.borrow_mut();
            for id in form.primitives(child_button)? {
                toolkit.click(id);
            }
            toolkit.press_key(form.window(), Key::Char('s'), Modifiers::CTRL);
            Ok(())
        });

    if let Err(err) = result {
        eprintln!("parent_form failed: {}", err);
    }

    let toolkit = toolkit.borrow();
    let windows = toolkit
        .calls()
        .iter()
        .filter(|call| matches!(call, ToolkitCall::CreateWindow { .. }))
        .count();
    println!("windows created: {}", windows);
    println!("primitives alive: {}", toolkit.live_primitive_count());
}
