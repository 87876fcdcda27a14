//! Declared request mappings.
//!
//! A controller lists its handler methods by filling a [`RequestMappings`]
//! collector. Each entry pairs a [`RequestMapping`] (URL pattern + method)
//! with a named handler function of the fixed handler signature.

use std::any::type_name;
use std::sync::Arc;

use crate::controller::Controller;
use crate::http::{Request, Response};
use crate::routing::{HandlerKey, HandlerResult, RequestMethod};

/// Route metadata attached to one handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMapping {
    pub value: String,
    pub method: RequestMethod,
}

impl RequestMapping {
    pub fn new(value: impl Into<String>, method: RequestMethod) -> Self {
        Self {
            value: value.into(),
            method,
        }
    }

    /// The lookup key for this mapping. The pattern is used verbatim.
    pub fn handler_key(&self) -> HandlerKey {
        HandlerKey::new(self.value.clone(), self.method)
    }
}

pub(crate) type ControllerHandler<C> =
    Arc<dyn Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync>;

/// One declared handler method of controller type `C`.
pub(crate) struct HandlerMethod<C> {
    pub(crate) mapping: RequestMapping,
    pub(crate) declaring_type: &'static str,
    pub(crate) name: &'static str,
    pub(crate) handler: ControllerHandler<C>,
}

impl<C> HandlerMethod<C> {
    /// `<DeclaringType>.<method>`
    pub(crate) fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// Collector a controller fills in [`Controller::request_mappings`].
pub struct RequestMappings<C> {
    methods: Vec<HandlerMethod<C>>,
}

impl<C: 'static> RequestMappings<C> {
    pub(crate) fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Declare `handler` under `value` + `method`. `name` is the method name
    /// reported in logs and invocation errors.
    pub fn route<F>(
        &mut self,
        value: impl Into<String>,
        method: RequestMethod,
        name: &'static str,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.methods.push(HandlerMethod {
            mapping: RequestMapping::new(value, method),
            declaring_type: type_name::<C>(),
            name,
            handler: Arc::new(handler),
        });
        self
    }

    pub fn get<F>(&mut self, value: impl Into<String>, name: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(value, RequestMethod::Get, name, handler)
    }

    pub fn post<F>(&mut self, value: impl Into<String>, name: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(value, RequestMethod::Post, name, handler)
    }

    pub fn put<F>(&mut self, value: impl Into<String>, name: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(value, RequestMethod::Put, name, handler)
    }

    pub fn delete<F>(&mut self, value: impl Into<String>, name: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&C, &Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.route(value, RequestMethod::Delete, name, handler)
    }

    /// Pull in every handler method declared by the parent controller `P`
    /// embedded in `C`. Inherited methods keep `P` as their declaring type.
    pub fn inherit<P: Controller>(&mut self, parent: fn(&C) -> &P) -> &mut Self {
        let mut inherited = RequestMappings::<P>::new();
        P::request_mappings(&mut inherited);

        for method in inherited.methods {
            let parent_handler = method.handler;
            let handler: ControllerHandler<C> =
                Arc::new(move |c: &C, req: &Request, resp: &mut Response| {
                    parent_handler(parent(c), req, resp)
                });
            self.methods.push(HandlerMethod {
                mapping: method.mapping,
                declaring_type: method.declaring_type,
                name: method.name,
                handler,
            });
        }
        self
    }

    pub(crate) fn into_methods(self) -> Vec<HandlerMethod<C>> {
        self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ModelAndView;
    use axum::body::Bytes;

    #[derive(Default)]
    struct Base {
        greeting: &'static str,
    }

    impl Base {
        fn ping(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
            Ok(ModelAndView::new("ping").add_object("greeting", self.greeting))
        }
    }

    impl Controller for Base {
        fn request_mappings(mappings: &mut RequestMappings<Self>) {
            mappings.get("/ping", "ping", Self::ping);
        }
    }

    struct Child {
        base: Base,
    }

    fn base_of(child: &Child) -> &Base {
        &child.base
    }

    #[test]
    fn test_route_records_declaring_type() {
        let mut mappings = RequestMappings::<Base>::new();
        Base::request_mappings(&mut mappings);

        let methods = mappings.into_methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].mapping, RequestMapping::new("/ping", RequestMethod::Get));
        assert!(methods[0].qualified_name().ends_with("Base.ping"));
    }

    #[test]
    fn test_inherit_projects_parent() {
        let mut mappings = RequestMappings::<Child>::new();
        mappings.inherit(base_of);

        let methods = mappings.into_methods();
        assert_eq!(methods.len(), 1);
        assert!(methods[0].declaring_type.ends_with("Base"));

        let child = Child {
            base: Base { greeting: "hi" },
        };
        let req = axum::http::Request::builder().uri("/ping").body(Bytes::new()).unwrap();
        let mav = (methods[0].handler)(&child, &req, &mut Response::new()).unwrap();
        assert_eq!(mav.get("greeting"), Some(&serde_json::json!("hi")));
    }

    #[test]
    fn test_handler_key_is_verbatim() {
        let mapping = RequestMapping::new("/Users/", RequestMethod::Put);
        assert_eq!(mapping.handler_key(), HandlerKey::new("/Users/", RequestMethod::Put));
    }
}
