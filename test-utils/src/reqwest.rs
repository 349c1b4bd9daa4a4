use std::error::Error;
use std::sync::LazyLock;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::IntoUrl;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub static RQ: LazyLock<Client> = LazyLock::new(||
    Client::new()
);

pub trait ReqwestClientExt {
    fn get_json_successfully<R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
    ) -> Result<R, Box<dyn Error>>;

    fn post_json_successfully<B: Serialize, R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
        body: &B,
    ) -> Result<R, Box<dyn Error>>;

    fn put_json_successfully<B: Serialize, R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
        body: &B,
    ) -> Result<R, Box<dyn Error>>;

    fn delete_successfully<R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
    ) -> Result<R, Box<dyn Error>>;
}

impl ReqwestClientExt for Client {
    fn get_json_successfully<R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
    ) -> Result<R, Box<dyn Error>> {
        send_json(self.get(url))
    }

    fn post_json_successfully<B: Serialize, R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
        body: &B,
    ) -> Result<R, Box<dyn Error>> {
        send_json(with_token(self.post(url), token).json(body))
    }

    fn put_json_successfully<B: Serialize, R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
        body: &B,
    ) -> Result<R, Box<dyn Error>> {
        send_json(with_token(self.put(url), token).json(body))
    }

    fn delete_successfully<R: DeserializeOwned>(
        &self,
        url: impl IntoUrl,
        token: Option<&str>,
    ) -> Result<R, Box<dyn Error>> {
        send_json(with_token(self.delete(url), token))
    }
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

fn send_json<R: DeserializeOwned>(request: RequestBuilder) -> Result<R, Box<dyn Error>> {
    Ok(
        request.send()?
            .error_for_status()?
            .json()?
    )
}
