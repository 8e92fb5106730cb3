use crate::error::{ReqwestBackendError, Result};

#[derive(Debug)]
pub(crate) struct ReqwestResponse {
    response: reqwest::Response,
    max_response_buffer_size: Option<u64>,
}

impl ReqwestResponse {
    pub fn new(response: reqwest::Response, max_response_buffer_size: Option<u64>) -> Self {
        Self {
            response,
            max_response_buffer_size,
        }
    }

    pub fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_owned(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    pub async fn collect_all_bytes(&mut self) -> Result<Vec<u8>> {
        let mut bufs = vec![];
        let mut collected_size = 0;
        while let Some(frame) = self.response.chunk().await? {
            if self
                .max_response_buffer_size
                .is_some_and(|max| (collected_size + frame.len()) as u64 > max)
            {
                return Err(ReqwestBackendError::ResponseTooLarge);
            }
            collected_size += frame.len();
            bufs.push(frame);
        }
        Ok(bufs.concat())
    }
}
