use super::{
    Action, ActionEvent, ActionOptions, CallRequest, Lifecycle, PopoverNotifier, Transport,
    TriggerElement,
};
use crate::error::{ActionError, TransportError};
use crate::model::Attributes;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Method used when neither the config nor the transport overrides set one.
pub const DEFAULT_METHOD: &str = "post";

/// A config value given directly or computed at invoke time.
#[derive(Clone)]
pub enum Resolve<T> {
    Value(T),
    With(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Resolve<T> {
    pub fn resolve(&self) -> T {
        match self {
            Resolve::Value(value) => value.clone(),
            Resolve::With(compute) => compute(),
        }
    }
}

type SuccessHook = Rc<dyn Fn(&Value)>;
type ErrorHook = Rc<dyn Fn(&TransportError)>;

/// Configuration for a `CallAction`.
#[derive(Clone, Default)]
pub struct CallConfig {
    url: Option<Resolve<String>>,
    data: Option<Resolve<Value>>,
    method: Option<String>,
    success: Option<SuccessHook>,
    error: Option<ErrorHook>,
    transport: Attributes,
}

impl CallConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the trigger's `data-url`.
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(Resolve::Value(url.to_string()));
        self
    }

    pub fn url_with(mut self, url: impl Fn() -> String + 'static) -> Self {
        self.url = Some(Resolve::With(Rc::new(url)));
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(Resolve::Value(data));
        self
    }

    pub fn data_with(mut self, data: impl Fn() -> Value + 'static) -> Self {
        self.data = Some(Resolve::With(Rc::new(data)));
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    /// Runs before the action's own `success` event.
    pub fn on_success(mut self, hook: impl Fn(&Value) + 'static) -> Self {
        self.success = Some(Rc::new(hook));
        self
    }

    /// Runs before the action's own `error` event.
    pub fn on_error(mut self, hook: impl Fn(&TransportError) + 'static) -> Self {
        self.error = Some(Rc::new(hook));
        self
    }

    /// Transport-specific option, merged over the defaults last.
    ///
    /// `url`, `method` (or `type`) and `data` here win over everything else.
    pub fn transport_option(mut self, key: &str, value: Value) -> Self {
        self.transport.insert(key.to_string(), value);
        self
    }

    /// Merges defaults, the trigger's `data-url` and the transport overrides.
    pub fn to_request(&self, element: &TriggerElement) -> CallRequest {
        let mut request = CallRequest {
            method: self
                .method
                .clone()
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            url: self
                .url
                .as_ref()
                .map(Resolve::resolve)
                .filter(|url| !url.is_empty())
                .or_else(|| {
                    element
                        .data_url()
                        .filter(|url| !url.is_empty())
                        .map(str::to_string)
                }),
            data: self
                .data
                .as_ref()
                .map(Resolve::resolve)
                .unwrap_or_else(|| Value::Object(Attributes::new())),
            options: Attributes::new(),
        };

        for (key, value) in &self.transport {
            match (key.as_str(), value) {
                ("url", Value::String(url)) => request.url = Some(url.clone()),
                ("method" | "type", Value::String(method)) => request.method = method.clone(),
                ("data", data) => request.data = data.clone(),
                _ => {
                    request.options.insert(key.clone(), value.clone());
                }
            }
        }
        request
    }
}

/// Handlers run once, in registration order, when a call completes.
struct CompletionChain {
    handlers: Vec<Box<dyn FnOnce(&Result<Value, TransportError>)>>,
}

impl CompletionChain {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    fn then(mut self, handler: impl FnOnce(&Result<Value, TransportError>) + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    fn run(self, outcome: Result<Value, TransportError>) {
        for handler in self.handlers {
            handler(&outcome);
        }
    }
}

/// Invokes by sending a request through a `Transport`.
pub struct CallAction {
    lifecycle: Rc<Lifecycle>,
    notifier: Option<Rc<RefCell<PopoverNotifier>>>,
    element: TriggerElement,
    transport: Rc<dyn Transport>,
    config: CallConfig,
}

impl CallAction {
    pub fn new(
        element: TriggerElement,
        transport: Rc<dyn Transport>,
        config: CallConfig,
        options: ActionOptions,
    ) -> Self {
        let (lifecycle, notifier) = options.build();
        Self {
            lifecycle,
            notifier,
            element,
            transport,
            config,
        }
    }

    pub fn element(&self) -> &TriggerElement {
        &self.element
    }

    pub fn config(&self) -> &CallConfig {
        &self.config
    }
}

impl Action for CallAction {
    fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    fn notifier(&self) -> Option<&Rc<RefCell<PopoverNotifier>>> {
        self.notifier.as_ref()
    }

    fn invoke(&self) -> Result<(), ActionError> {
        let request = self.config.to_request(&self.element);
        log::info!(
            "Action '{}' calling {} {}",
            self.name(),
            request.method,
            request.url.as_deref().unwrap_or("<current page>")
        );

        let success = self.config.success.clone();
        let error = self.config.error.clone();
        let lifecycle = Rc::clone(&self.lifecycle);
        let chain = CompletionChain::new()
            .then(move |outcome| match outcome {
                Ok(response) => {
                    if let Some(hook) = &success {
                        hook(response);
                    }
                }
                Err(failure) => {
                    if let Some(hook) = &error {
                        hook(failure);
                    }
                }
            })
            .then(move |outcome| match outcome {
                Ok(_) => lifecycle.emit(ActionEvent::Success),
                Err(failure) => lifecycle.fail(failure.clone()),
            });

        self.lifecycle.emit(ActionEvent::Invoke);
        self.transport
            .send(request, Box::new(move |outcome| chain.run(outcome)));
        Ok(())
    }
}
