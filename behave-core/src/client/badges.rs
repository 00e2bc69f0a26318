use crate::rest::{
    client::{RequestError, RestClient},
    envelope::Payload,
    segment,
    transport::Transport,
};
use http::Method;

pub struct Badges<'a, T> {
    rest: &'a RestClient<T>,
}

impl<'a, T: Transport> Badges<'a, T> {
    pub(crate) fn new(rest: &'a RestClient<T>) -> Self {
        Self { rest }
    }

    pub async fn delete(&self, badge_id: &str) -> Result<Payload, RequestError> {
        let path = format!("/badges/{}", segment(badge_id));
        self.rest.call(Method::DELETE, &path, None).await
    }
}
