use crate::controller::{Controller, RequestMappings};
use crate::http::{ModelAndView, Request, Response};
use crate::routing::HandlerResult;

/// Liveness endpoint, embedded by controllers that want to expose it.
#[derive(Debug, Default)]
pub struct StatusController;

impl StatusController {
    fn status(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
        Ok(ModelAndView::new("status")
            .add_object("status", "ok")
            .add_object("version", env!("CARGO_PKG_VERSION")))
    }
}

impl Controller for StatusController {
    fn package() -> &'static str {
        module_path!()
    }

    fn request_mappings(mappings: &mut RequestMappings<Self>) {
        mappings.get("/status", "status", Self::status);
    }
}

#[derive(Debug, Default)]
pub struct HomeController {
    status: StatusController,
}

impl HomeController {
    fn index(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
        Ok(ModelAndView::new("index").add_object("title", "mvc-router"))
    }

    fn status_controller(&self) -> &StatusController {
        &self.status
    }
}

impl Controller for HomeController {
    fn package() -> &'static str {
        module_path!()
    }

    fn request_mappings(mappings: &mut RequestMappings<Self>) {
        mappings
            .get("/", "index", Self::index)
            .inherit(Self::status_controller);
    }
}
