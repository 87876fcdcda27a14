//! In-memory user management.

use axum::http::StatusCode;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, RequestMappings};
use crate::http::{ModelAndView, Request, RequestExt, Response};
use crate::routing::HandlerResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct UserController {
    users: DashMap<String, User>,
}

impl UserController {
    fn list(&self, _req: &Request, _resp: &mut Response) -> HandlerResult {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(ModelAndView::new("user/list").add_object("users", serde_json::to_value(users)?))
    }

    fn create(&self, req: &Request, resp: &mut Response) -> HandlerResult {
        let user: User = serde_json::from_slice(req.body())?;
        if self.users.contains_key(&user.user_id) {
            resp.set_status(StatusCode::CONFLICT);
            return Ok(ModelAndView::new("user/form").add_object("error", "user already exists"));
        }

        tracing::debug!(user_id = %user.user_id, "User created");
        self.users.insert(user.user_id.clone(), user);
        Ok(ModelAndView::redirect("/users"))
    }

    fn profile(&self, req: &Request, resp: &mut Response) -> HandlerResult {
        let user_id = req
            .query_param("userId")
            .ok_or("missing userId query parameter")?;

        match self.users.get(&user_id) {
            Some(user) => Ok(ModelAndView::new("user/profile")
                .add_object("user", serde_json::to_value(user.value())?)),
            None => {
                resp.set_status(StatusCode::NOT_FOUND);
                Ok(ModelAndView::new("user/profile").add_object("error", "no such user"))
            }
        }
    }

    fn update(&self, req: &Request, _resp: &mut Response) -> HandlerResult {
        let updated: User = serde_json::from_slice(req.body())?;
        let mut user = self
            .users
            .get_mut(&updated.user_id)
            .ok_or_else(|| format!("unknown user {}", updated.user_id))?;
        *user = updated;
        Ok(ModelAndView::redirect("/users"))
    }
}

impl Controller for UserController {
    fn package() -> &'static str {
        module_path!()
    }

    fn request_mappings(mappings: &mut RequestMappings<Self>) {
        mappings
            .get("/users", "list", Self::list)
            .post("/users", "create", Self::create)
            .get("/users/profile", "profile", Self::profile)
            .put("/users", "update", Self::update);
    }
}
