//! Form facade tests against the headless toolkit.
//!
//! These cover content creation, handle bookkeeping and the bulk state
//! operations without a display.

use std::cell::RefCell;
use std::rc::Rc;

use formwork_test_utils::HeadlessToolkit;
use formwork_toolkit::{PrimitiveKind, Toolkit, WidgetState};
use formwork_ui::{
    Adapter, ContentSpec, ContentTag, Form, FormConfig, FormContext, FormError, FormState, Handle,
    Layout, Placement, Size, callback,
};

fn setup() -> (Rc<RefCell<HeadlessToolkit>>, Rc<FormContext>, Form) {
    let toolkit = HeadlessToolkit::shared();
    let context = FormContext::new(toolkit.clone());
    let form = Form::new_root(&context, 500, 200, "parent").unwrap();
    (toolkit, context, form)
}

fn kinds(toolkit: &Rc<RefCell<HeadlessToolkit>>, form: &Form, handle: Handle) -> Vec<PrimitiveKind> {
    let toolkit = toolkit.borrow();
    form.primitives(handle)
        .unwrap()
        .into_iter()
        .map(|id| toolkit.primitive(id).unwrap().kind())
        .collect()
}

#[test]
fn test_handles_unique_across_tags() {
    let (_toolkit, _context, form) = setup();

    let mut handles = vec![
        form.add_button("Go", Some(callback(|| {})), Layout::default()).unwrap(),
        form.add_button("Nothing", None, Layout::default()).unwrap(),
        form.add_label("Title", Layout::default()).unwrap(),
        form.add_entry("Name", Layout::default()).unwrap().0,
        form.add_text("Notes", Layout::default()).unwrap().0,
        form.add_option_menu("Pick", ["A", "B"], Layout::default()).unwrap().0,
        form.add_checkbox("Agree", || {}, || {}, Layout::default()).unwrap().0,
    ];
    for _ in 0..10 {
        handles.push(form.add_label("again", Layout::default()).unwrap());
    }

    let mut deduped = handles.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), handles.len());
}

#[test]
fn test_entry_round_trip() {
    let (_toolkit, _context, form) = setup();
    let (_, cell) = form.add_entry("Name", Layout::default()).unwrap();

    cell.set("Ada Lovelace");
    assert_eq!(cell.get(), "Ada Lovelace");
}

#[test]
fn test_text_round_trip_without_trailing_newline() {
    let (_toolkit, _context, form) = setup();
    let (_, cell) = form.add_text("Notes", Layout::default()).unwrap();

    assert_eq!(cell.get().unwrap(), "");
    cell.set("first line\nsecond line").unwrap();
    assert_eq!(cell.get().unwrap(), "first line\nsecond line");
}

#[test]
fn test_clear_label_is_noop() {
    let (toolkit, _context, form) = setup();
    let handle = form.add_label("Title", Layout::default()).unwrap();
    toolkit.borrow_mut().clear_calls();

    let report = form.clear(handle).unwrap();

    assert!(report.is_clean());
    assert!(report.cleared.is_empty());
    assert_eq!(toolkit.borrow().count_clears(), 0);
}

#[test]
fn test_enable_then_disable_converges() {
    let (toolkit, _context, form) = setup();
    let (handle, _) = form.add_entry("Name", Layout::default()).unwrap();
    let ids = form.primitives(handle).unwrap();

    // start from a mixed group
    toolkit
        .borrow_mut()
        .set_state(ids[1], WidgetState::Disabled)
        .unwrap();
    form.enable(handle).unwrap();
    form.disable(handle).unwrap();

    for id in ids {
        assert_eq!(toolkit.borrow().state(id), Ok(WidgetState::Disabled));
    }
}

#[test]
fn test_toggle_fresh_group_disables_all() {
    let (toolkit, _context, form) = setup();
    let (handle, _) = form.add_entry("Name", Layout::default()).unwrap();

    form.toggle(handle).unwrap();

    for id in form.primitives(handle).unwrap() {
        assert_eq!(toolkit.borrow().state(id), Ok(WidgetState::Disabled));
    }
}

#[test]
fn test_toggle_alternates_single_primitive() {
    let (toolkit, _context, form) = setup();
    let handle = form.add_label("Status", Layout::default()).unwrap();
    let id = form.primitives(handle).unwrap()[0];

    for expected in [
        WidgetState::Disabled,
        WidgetState::Normal,
        WidgetState::Disabled,
        WidgetState::Normal,
    ] {
        form.toggle(handle).unwrap();
        assert_eq!(toolkit.borrow().state(id), Ok(expected));
    }
}

#[test]
fn test_entry_name_scenario() {
    let (toolkit, _context, form) = setup();
    let (handle, cell) = form.add_entry("Name", Layout::default()).unwrap();

    let group = form.group(handle).unwrap();
    assert_eq!(group.tag, ContentTag::Entry);
    assert_eq!(group.size, Size::new(9, 1));
    assert_eq!(
        kinds(&toolkit, &form, handle),
        vec![PrimitiveKind::Label, PrimitiveKind::Entry]
    );
    assert_eq!(cell.get(), "");

    let input = form.primitives(handle).unwrap()[1];
    assert_eq!(toolkit.borrow().primitive(input).unwrap().configured_width(), Some(9));
}

#[test]
fn test_entry_only_width_applies() {
    let (toolkit, _context, form) = setup();
    let (handle, _) = form.add_entry("Name", Size::new(30, 4)).unwrap();

    let input = form.primitives(handle).unwrap()[1];
    let toolkit = toolkit.borrow();
    let primitive = toolkit.primitive(input).unwrap();
    assert_eq!(primitive.configured_width(), Some(30));
    assert_eq!(primitive.configured_height(), None);
}

#[test]
fn test_options_start_at_placeholder() {
    let (toolkit, _context, form) = setup();
    let (handle, cell) = form
        .add_option_menu("Letter", ["A", "B", "C"], Layout::default())
        .unwrap();

    assert_eq!(cell.get(), "choose an option");
    assert!(!["A", "B", "C"].contains(&cell.get().as_str()));
    assert_eq!(
        kinds(&toolkit, &form, handle),
        vec![PrimitiveKind::Label, PrimitiveKind::Dropdown]
    );

    let dropdown = form.primitives(handle).unwrap()[1];
    assert!(toolkit.borrow_mut().select_option(dropdown, "B"));
    form.mainloop();
    assert_eq!(cell.get(), "B");
    assert!(!toolkit.borrow_mut().select_option(dropdown, "Z"));
    form.mainloop();
    assert_eq!(cell.get(), "B");
}

#[test]
fn test_options_without_caption_has_no_label() {
    let (toolkit, _context, form) = setup();
    let (handle, _) = form.add_option_menu("", ["A"], Layout::default()).unwrap();
    assert_eq!(kinds(&toolkit, &form, handle), vec![PrimitiveKind::Dropdown]);
}

#[test]
fn test_configured_placeholder() {
    let toolkit = HeadlessToolkit::shared();
    let config = FormConfig::default().with_options_placeholder("-- pick --");
    let context = FormContext::with_config(toolkit, config);
    let form = Form::new_root(&context, 300, 100, "config").unwrap();

    let (_, cell) = form.add_option_menu("Pick", ["A"], Layout::default()).unwrap();
    assert_eq!(cell.get(), "-- pick --");
}

#[test]
fn test_button_without_command() {
    let (toolkit, _context, form) = setup();
    let before = toolkit.borrow().count_primitive_creates();

    let handle = form.add_button("Go", None, Layout::default()).unwrap();

    assert_eq!(toolkit.borrow().count_primitive_creates(), before);
    assert_eq!(toolkit.borrow().find_by_caption("Go"), None);
    assert!(form.group(handle).is_none());
    assert!(form.handles().is_empty());
    assert_eq!(form.enable(handle), Err(FormError::UnknownHandle(handle)));
    assert_eq!(form.clear(handle), Err(FormError::UnknownHandle(handle)));
}

#[test]
fn test_generic_button_without_command() {
    let (toolkit, _context, form) = setup();
    let spec = ContentSpec::Button {
        caption: "Go".into(),
        command: None,
    };

    let (handle, adapter) = form.add(spec, Layout::default()).unwrap();

    assert!(adapter.is_absent());
    assert_eq!(toolkit.borrow().count_primitive_creates(), 0);
    assert_eq!(form.primitives(handle), Err(FormError::UnknownHandle(handle)));
}

#[test]
fn test_generic_add_adapters() {
    let (_toolkit, _context, form) = setup();

    let (_, adapter) = form.add(ContentSpec::entry("Name"), Layout::default()).unwrap();
    assert!(matches!(adapter, Adapter::String(_)));

    let (_, adapter) = form.add(ContentSpec::text("Notes"), Layout::default()).unwrap();
    let text = adapter.as_text().unwrap();
    text.set("hello").unwrap();
    assert_eq!(text.get().unwrap(), "hello");

    let (_, adapter) = form
        .add(ContentSpec::checkbox("Agree", || {}, || {}), Layout::default())
        .unwrap();
    assert_eq!(adapter.as_bool().map(|cell| cell.get()), Some(true));

    let (_, adapter) = form.add(ContentSpec::label("Hi"), Layout::default()).unwrap();
    assert!(adapter.is_absent());
}

#[test]
fn test_handles_rejected_by_other_forms() {
    let (_toolkit, _context, form) = setup();
    let child = form.generate_child(300, 300, "child").unwrap();

    let parent_handle = form.add_label("parent", Layout::default()).unwrap();
    let child_handle = child.add_label("child", Layout::default()).unwrap();

    assert_ne!(parent_handle, child_handle);
    assert_eq!(
        child.enable(parent_handle),
        Err(FormError::UnknownHandle(parent_handle))
    );
    assert_eq!(
        form.toggle(child_handle),
        Err(FormError::UnknownHandle(child_handle))
    );
}

#[test]
fn test_clear_text_and_entry() {
    let (_toolkit, _context, form) = setup();
    let (entry, name) = form.add_entry("Name", Layout::default()).unwrap();
    let (text, notes) = form.add_text("", Layout::default()).unwrap();

    name.set("Ada");
    notes.set("line\nline").unwrap();

    let report = form.clear(entry).unwrap();
    assert_eq!(report.cleared.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(name.get(), "");

    form.clear(text).unwrap().into_result().unwrap();
    assert_eq!(notes.get().unwrap(), "");
}

#[test]
fn test_cell_watchers_may_use_the_form() {
    let (_toolkit, _context, form) = setup();
    let form = Rc::new(form);
    let (first, name) = form.add_entry("Name", Layout::default()).unwrap();
    let (_, city) = form.add_entry("City", Layout::default()).unwrap();
    name.set("Ada");
    city.set("London");

    for cell in [&name, &city] {
        let inner = Rc::downgrade(&form);
        cell.watch(move |value| {
            if let Some(form) = inner.upgrade() {
                form.show_info(&format!("now {:?}", value), false).unwrap();
            }
        });
    }

    form.clear(first).unwrap();
    assert_eq!(name.get(), "");
    assert_eq!(form.info_lines().len(), 1);

    let report = form.clear_all();
    assert!(report.is_clean());
    assert_eq!(city.get(), "");
    assert_eq!(form.info_lines().len(), 3);
}

#[test]
fn test_clear_all_reports_failures_and_continues() {
    let (_toolkit, _context, form) = setup();
    form.add_button("Go", Some(callback(|| {})), Layout::default())
        .unwrap();
    let (_, name) = form.add_entry("Name", Layout::default()).unwrap();
    form.add_checkbox("Agree", || {}, || {}, Layout::default())
        .unwrap();
    name.set("Ada");

    let report = form.clear_all();

    assert_eq!(name.get(), "");
    assert_eq!(report.cleared.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].kind, PrimitiveKind::Button);
    assert_eq!(report.failures[1].kind, PrimitiveKind::Checkbox);
}

#[test]
fn test_deferred_placement_then_pack() {
    let (toolkit, _context, form) = setup();
    let (handle, _) = form.add_entry("Later", Layout::deferred()).unwrap();
    let shown = form.add_label("Now", Layout::default()).unwrap();

    let window = form.window();
    assert_eq!(toolkit.borrow().layout(window), form.primitives(shown).unwrap());
    assert!(!form.group(handle).unwrap().packed);

    form.pack(handle).unwrap();

    let mut expected = form.primitives(shown).unwrap();
    expected.extend(form.primitives(handle).unwrap());
    assert_eq!(toolkit.borrow().layout(window), expected);
}

#[test]
fn test_form_default_placement() {
    let (toolkit, context, _form) = setup();
    let form = Form::builder(300, 200, "manual")
        .placement(Placement::Deferred)
        .build_root(&context)
        .unwrap();

    let handle = form.add_label("hidden", Layout::default()).unwrap();
    let shown = form.add_label("shown", Placement::Pack).unwrap();

    assert!(!form.group(handle).unwrap().packed);
    assert_eq!(toolkit.borrow().layout(form.window()), form.primitives(shown).unwrap());
}

#[test]
fn test_new_root_replaces_previous_root() {
    let (toolkit, context, first) = setup();
    let child = first.generate_child(200, 200, "child").unwrap();

    let second = Form::new_root(&context, 400, 300, "second").unwrap();

    assert_eq!(first.state(), FormState::Destroyed);
    assert_eq!(child.state(), FormState::Destroyed);
    assert_eq!(second.state(), FormState::Active);
    assert_eq!(context.root(), Some(second.window()));
    assert!(toolkit.borrow().is_window_alive(second.window()));
}

#[test]
fn test_child_leaves_parent_alone_and_cascades() {
    let (_toolkit, _context, parent) = setup();
    let child = parent.generate_child(300, 300, "child").unwrap();
    let grandchild = child.generate_child(100, 100, "grandchild").unwrap();

    assert_eq!(parent.state(), FormState::Active);

    child.destroy();
    assert_eq!(parent.state(), FormState::Active);
    assert_eq!(child.state(), FormState::Destroyed);
    assert_eq!(grandchild.state(), FormState::Destroyed);

    let other = parent.generate_child(300, 300, "other").unwrap();
    parent.destroy();
    assert_eq!(other.state(), FormState::Destroyed);
}

#[test]
fn test_destroyed_form_rejects_content() {
    let (_toolkit, _context, form) = setup();
    form.destroy();

    assert_eq!(
        form.add_label("late", Layout::default()),
        Err(FormError::WindowDestroyed(form.window()))
    );
    assert!(matches!(
        form.generate_child(100, 100, "orphan"),
        Err(FormError::WindowDestroyed(_))
    ));
}

#[test]
fn test_show_info_replace_and_append() {
    let (toolkit, _context, form) = setup();

    form.show_info("first", true).unwrap();
    let first = form.info_lines();
    form.show_info("second", true).unwrap();
    assert_eq!(form.info_lines().len(), 1);
    assert!(toolkit.borrow().primitive(first[0]).is_some_and(|p| !p.alive));

    form.show_info("third", false).unwrap();
    assert_eq!(form.info_lines().len(), 2);
    assert!(toolkit.borrow().find_by_caption("second").is_some());
    assert!(toolkit.borrow().find_by_caption("third").is_some());

    form.clear_info();
    assert!(form.info_lines().is_empty());
    assert_eq!(toolkit.borrow().find_by_caption("third"), None);
}

#[test]
fn test_info_lines_pack_at_bottom() {
    let (toolkit, _context, form) = setup();
    form.info("status").unwrap();

    let line = form.info_lines()[0];
    assert_eq!(
        toolkit.borrow().primitive(line).unwrap().packed,
        Some(formwork_toolkit::PackSide::Bottom)
    );
    // info lines are not widget groups
    assert!(form.handles().is_empty());
}

#[test]
fn test_message_box_pads_to_title() {
    let (toolkit, _context, form) = setup();

    form.message_box("Oops", "Something failed");
    form.message_box("a message that is already long enough", "Err");

    let toolkit = toolkit.borrow();
    let errors = toolkit.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].title, "Something failed");
    assert_eq!(errors[0].message.chars().count(), "Something failed".len() + 15);
    assert!(errors[0].message.starts_with("Oops "));
    assert_eq!(errors[1].message, "a message that is already long enough");
}

#[test]
fn test_progress_start_stop() {
    let (toolkit, _context, form) = setup();

    form.start_progress().unwrap();
    form.start_progress().unwrap();
    assert!(form.progress_running());

    let running: Vec<_> = toolkit
        .borrow()
        .primitives_in(form.window())
        .into_iter()
        .filter(|id| {
            let toolkit = toolkit.borrow();
            let primitive = toolkit.primitive(*id).unwrap();
            primitive.kind() == PrimitiveKind::Progress && primitive.progress_running
        })
        .collect();
    assert_eq!(running.len(), 1);

    form.stop_progress().unwrap();
    assert!(!form.progress_running());
    assert!(toolkit.borrow().primitives_in(form.window()).is_empty());

    // stopping again is a logged no-op
    form.stop_progress().unwrap();
}

#[test]
fn test_invalid_key_sequence() {
    let (_toolkit, _context, form) = setup();
    assert!(matches!(
        form.bind("<Hyper-x>", || {}),
        Err(FormError::InvalidKeySequence(_))
    ));
    assert!(form.bind("<Control-s>", || {}).is_ok());
}
