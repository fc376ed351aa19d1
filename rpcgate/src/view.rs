//! 视图路由：服务端视图（视图类名 + 正则路由 + 操作列表）-> 可调用的端点
//!
//! 模板由 [`extract_url_params`] 得到，只把命名分组换成 `${name}`，
//! `^`、`(?:…)?`、`$` 等其余正则语法原样保留在模板和最终 URL 中。
//! 路由应尽量写成不含可选分组、锚点的形式。

use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::path::resolve_path;
use crate::route::{api_view_methods, endpoint_name, extract_url_params, Action};

/// 视图上的一个操作：ViewSet 动作或 APIView 的 HTTP 方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Action(Action),
    Verb(Method),
}

impl Operation {
    pub fn verb(&self) -> Method {
        match self {
            Operation::Action(action) => action.verb(),
            Operation::Verb(method) => method.clone(),
        }
    }

    pub fn is_query(&self) -> bool {
        match self {
            Operation::Action(action) => action.is_query(),
            Operation::Verb(method) => *method == Method::GET,
        }
    }
}

impl From<Action> for Operation {
    fn from(action: Action) -> Self {
        Operation::Action(action)
    }
}

impl From<Method> for Operation {
    fn from(method: Method) -> Self {
        Operation::Verb(method)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Action(action) => f.write_str(action.as_str()),
            Operation::Verb(method) => f.write_str(&method.as_str().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewRoute {
    name: String,
    template: String,
    params: Vec<String>,
    operations: Vec<Operation>,
}

impl ViewRoute {
    pub fn new<O>(view_name: &str, route: &str, operations: impl IntoIterator<Item = O>) -> Self
    where
        O: Into<Operation>,
    {
        let (params, template) = extract_url_params(route);
        Self {
            name: endpoint_name(view_name),
            template,
            params,
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    /// ViewSet：六个标准动作
    pub fn viewset(view_name: &str, route: &str) -> Self {
        Self::new(view_name, route, Action::VIEWSET)
    }

    /// APIView：见 [`api_view_methods`]
    pub fn api_view<S: AsRef<str>>(view_name: &str, route: &str, http_method_names: &[S]) -> Result<Self> {
        Ok(Self::new(view_name, route, api_view_methods(http_method_names)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn supports(&self, operation: &Operation) -> bool {
        self.operations.contains(operation)
    }

    /// 用参数填充路由模板
    pub fn url<I, K, V>(&self, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        resolve_path(&self.template, params)
    }

    /// 以操作对应的 HTTP 方法发送请求；视图不支持该操作时返回 [`Error::InvalidArgument`]
    pub async fn call<F, T, P, O, I, K, V>(
        &self,
        dispatcher: &Dispatcher<F>,
        operation: O,
        params: I,
        payload: Option<&P>,
    ) -> Result<T>
    where
        F: Fetch,
        T: DeserializeOwned,
        P: Serialize + ?Sized,
        O: Into<Operation>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let operation = operation.into();
        if !self.supports(&operation) {
            return Err(Error::InvalidArgument(format!(
                "view `{}` does not support `{}`",
                self.name, operation
            )));
        }

        let path = self.url(params);
        debug!(view = %self.name, %operation, %path, "calling view");
        dispatcher.send(operation.verb(), &path, payload).await
    }

    /// 不带请求体的 [`call`](Self::call)，用于 list / retrieve
    pub async fn query<F, T, O, I, K, V>(
        &self,
        dispatcher: &Dispatcher<F>,
        operation: O,
        params: I,
    ) -> Result<T>
    where
        F: Fetch,
        T: DeserializeOwned,
        O: Into<Operation>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.call(dispatcher, operation, params, None::<&()>).await
    }

    /// 变更操作：路径参数取自 JSON 负载中的同名字段，负载本身作为请求体
    pub async fn mutate<F, T, O>(&self, dispatcher: &Dispatcher<F>, operation: O, payload: &Value) -> Result<T>
    where
        F: Fetch,
        T: DeserializeOwned,
        O: Into<Operation>,
    {
        let params = self.params_from_payload(payload);
        self.call(dispatcher, operation, params, Some(payload)).await
    }

    // 缺失或为 null 的字段不参与替换，对应占位符保持原样
    fn params_from_payload(&self, payload: &Value) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter_map(|name| {
                let value = match payload.get(name)? {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.clone(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VISITS: &str = r"patients/(?P<patient_id>[^/.]+)/visits/(?P<pk>[^/.]+)/";

    #[test]
    fn viewset_route_from_class_name_and_regex() {
        let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);
        assert_eq!(view.name(), "patientVisit");
        assert_eq!(view.template(), "patients/${patient_id}/visits/${pk}/");
        assert_eq!(view.params(), ["patient_id", "pk"]);
        assert_eq!(view.operations().len(), 6);
        assert!(view.supports(&Action::PartialUpdate.into()));
        assert!(!view.supports(&Method::GET.into()));
    }

    #[test]
    fn url_fills_template() {
        let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);
        assert_eq!(view.url([("patient_id", "3"), ("pk", "11")]), "patients/3/visits/11/");
    }

    #[test]
    fn regex_syntax_outside_groups_is_kept() {
        let view = ViewRoute::viewset("PatientViewSet", r"^patients/(?:(?P<pk>[^/.]+)/)?$");
        assert_eq!(view.url([("pk", "7")]), "^patients/(?:7/)?$");
    }

    #[test]
    fn api_view_operations_are_verbs() {
        let view = ViewRoute::api_view("HealthView", "health/", &["get", "options"]).unwrap();
        assert_eq!(view.name(), "health");
        assert_eq!(view.operations(), [Operation::Verb(Method::GET)]);
        assert!(view.operations()[0].is_query());
    }

    #[test]
    fn payload_fields_become_path_params() {
        let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);
        let params = view.params_from_payload(&json!({ "patient_id": 3, "pk": "11", "notes": "x" }));
        assert_eq!(
            params,
            vec![("patient_id".to_string(), "3".to_string()), ("pk".to_string(), "11".to_string())]
        );
        assert!(view.params_from_payload(&json!({ "pk": null })).is_empty());
    }

    #[test]
    fn operation_display_and_query_split() {
        assert_eq!(Operation::from(Action::PartialUpdate).to_string(), "partial_update");
        assert_eq!(Operation::from(Method::DELETE).to_string(), "delete");
        assert!(Operation::from(Action::List).is_query());
        assert!(!Operation::from(Method::POST).is_query());
    }
}
