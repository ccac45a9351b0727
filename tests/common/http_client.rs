//! Thin reqwest wrapper for talking to a spawned test server.

use reqwest::multipart::{Form, Part};

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// POSTs a multipart form to `/analyze`; returns the status code and the
    /// parsed JSON body.
    pub async fn analyze(
        &self,
        teacher: Option<(&str, Vec<u8>)>,
        students: &[(&str, Vec<u8>)],
    ) -> anyhow::Result<(u16, serde_json::Value)> {
        let mut form = Form::new();
        if let Some((name, bytes)) = teacher {
            form = form.part("teacher", pdf_part(name, bytes));
        }
        for (name, bytes) in students {
            form = form.part("students", pdf_part(name, bytes.clone()));
        }

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.json().await?;
        Ok((status, body))
    }

    pub async fn liveness(&self) -> anyhow::Result<(u16, String)> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.text().await?))
    }

    pub async fn health(&self) -> anyhow::Result<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await?;
        Ok(response.json().await?)
    }
}

fn pdf_part(filename: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("application/pdf")
        .expect("static mime type parses")
}
