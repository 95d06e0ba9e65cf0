use super::lifecycle::{ActionEvent, Lifecycle};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Text shown while an action is in flight.
pub const LOADING_TEXT: &str = "loading...";

/// The surface a notifier renders onto.
pub trait NotifierView {
    fn set_text(&mut self, text: &str);
    fn show(&mut self);
}

/// A headless popover: keeps the last text and visibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popover {
    pub text: String,
    pub visible: bool,
}

impl NotifierView for Popover {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn show(&mut self) {
        self.visible = true;
    }
}

/// A feedback message, rendered against the action's name.
#[derive(Clone)]
pub enum MessageTemplate {
    /// `{name}` is replaced with the action name.
    Format(String),
    Dynamic(Rc<dyn Fn(&str) -> String>),
}

impl MessageTemplate {
    pub fn format(template: &str) -> Self {
        MessageTemplate::Format(template.to_string())
    }

    pub fn dynamic(render: impl Fn(&str) -> String + 'static) -> Self {
        MessageTemplate::Dynamic(Rc::new(render))
    }

    pub fn render(&self, action_name: &str) -> String {
        match self {
            MessageTemplate::Format(template) => template.replace("{name}", action_name),
            MessageTemplate::Dynamic(render) => render(action_name),
        }
    }
}

impl fmt::Debug for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTemplate::Format(template) => f.debug_tuple("Format").field(template).finish(),
            MessageTemplate::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Configuration for an action's notifier.
pub struct NotifierOptions {
    pub success_msg: MessageTemplate,
    pub error_msg: MessageTemplate,
    pub view: Box<dyn NotifierView>,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            success_msg: MessageTemplate::format("{name} successful!"),
            error_msg: MessageTemplate::format("{name} failed :/"),
            view: Box::new(Popover::default()),
        }
    }
}

impl NotifierOptions {
    pub fn success_msg(mut self, template: MessageTemplate) -> Self {
        self.success_msg = template;
        self
    }

    pub fn error_msg(mut self, template: MessageTemplate) -> Self {
        self.error_msg = template;
        self
    }

    pub fn view(mut self, view: impl NotifierView + 'static) -> Self {
        self.view = Box::new(view);
        self
    }
}

/// Renders transient feedback for one action's `invoke`, `success` and `error` events.
pub struct PopoverNotifier {
    action_name: String,
    success_msg: MessageTemplate,
    error_msg: MessageTemplate,
    view: Box<dyn NotifierView>,
    text: String,
    visible: bool,
}

impl PopoverNotifier {
    /// Builds a notifier and subscribes it to all three of the action's events.
    pub fn attach(lifecycle: &Lifecycle, options: NotifierOptions) -> Rc<RefCell<Self>> {
        let notifier = Rc::new(RefCell::new(Self {
            action_name: lifecycle.name().to_string(),
            success_msg: options.success_msg,
            error_msg: options.error_msg,
            view: options.view,
            text: String::new(),
            visible: false,
        }));
        let handle = Rc::clone(&notifier);
        lifecycle.subscribe(None, move |event| handle.borrow_mut().handle(event));
        notifier
    }

    fn handle(&mut self, event: ActionEvent) {
        match event {
            ActionEvent::Invoke => {
                self.render(LOADING_TEXT.to_string());
                self.visible = true;
                self.view.show();
            }
            ActionEvent::Success => self.render(self.success_msg.render(&self.action_name)),
            ActionEvent::Error => self.render(self.error_msg.render(&self.action_name)),
        }
    }

    fn render(&mut self, text: String) {
        self.view.set_text(&text);
        self.text = text;
    }

    /// The text last rendered.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl fmt::Debug for PopoverNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverNotifier")
            .field("action_name", &self.action_name)
            .field("text", &self.text)
            .field("visible", &self.visible)
            .finish()
    }
}
