use rpcgate::endpoints;

#[allow(async_fn_in_trait)]
#[endpoints(base_url = "/api")]
pub trait Users {
    #[get(path = "/users/")]
    async fn list(&self) -> rpcgate::Result<Vec<crate::User>>;

    #[get(path = "/users/${id}")]
    async fn retrieve(&self, #[path] id: u64) -> rpcgate::Result<crate::User>;

    #[post(path = "/users")]
    async fn create(&self, #[json] body: crate::NewUser) -> rpcgate::Result<crate::Created>;

    #[get(path = "/users/${id}/posts/${post_id}")]
    async fn post(&self, #[path] id: u64, #[path] post_id: u64) -> rpcgate::Result<serde_json::Value>;

    #[get(path = "/users/${id}/tags/${type}")]
    async fn tags(&self, #[path] id: u64, #[path] r#type: String) -> rpcgate::Result<Vec<String>>;

    #[delete(path = "/users/${id}")]
    async fn destroy(&self, #[path] id: u64) -> rpcgate::Result<serde_json::Value>;
}

#[allow(async_fn_in_trait)]
#[endpoints]
pub trait PatientVisits {
    #[patch(path = "/patients/${patient_id}/visits/${pk}/")]
    async fn partial_update(
        &self,
        #[path] patient_id: String,
        #[path] pk: String,
        #[json] body: serde_json::Value,
    ) -> rpcgate::Result<serde_json::Value>;
}
