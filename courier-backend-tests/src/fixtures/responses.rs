#[cfg(test)]
mod tests {
    use hyper::{Method, StatusCode};

    use crate::*;

    #[test]
    fn test_get_text() {
        const PATH: &str = "responses/get_text";
        const BODY: &str = r#"{"message": "Hello, world!"}"#;
        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let res = Response::new(Full::new(Bytes::from(BODY)));
            (res, (req.method() == Method::GET).then_some(()).ok_or(req))
        });

        let client = crate::init_client();
        let res = client.get(crate::url(PATH)).execute_optional().unwrap();
        assert_eq!(res.status_code(), 200);
        assert!(res.is_successful());
        assert_eq!(res.content(), BODY);
        assert_eq!(
            res.to_string(),
            format!("Response [status=200, content={BODY}]")
        );
    }

    #[test]
    fn test_get_bytes() {
        const PATH: &str = "responses/get_bytes";
        const BODY: &[u8] = b"\x01\x02\x03\x04";
        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let res = Response::new(Full::new(Bytes::from(BODY)));
            (res, (req.method() == Method::GET).then_some(()).ok_or(req))
        });

        let client = crate::init_client();
        let res = client.get(crate::url(PATH)).execute_optional().unwrap();
        assert_eq!(res.bytes(), BODY);
    }

    #[test]
    fn test_response_headers() {
        const PATH: &str = "responses/headers";
        let _handle = crate::add_hyper_fixture(PATH, |_| async move {
            let res = Response::builder()
                .header("X-Single", "one")
                .header("x-multi", "1")
                .header("x-multi", "2")
                .body(Full::new(Bytes::new()))
                .unwrap();
            (res, Ok(()))
        });

        let client = crate::init_client();
        let res = client.get(crate::url(PATH)).execute_optional().unwrap();
        // Header names arrive lower-cased.
        assert_eq!(res.header("x-single"), "one");
        assert_eq!(res.header("X-Single"), "No Header with key X-Single");
        assert_eq!(res.header("x-multi"), "1");
        assert_eq!(res.header_values("x-multi").collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(res.header("absent"), "No Header with key absent");
    }

    #[test]
    fn test_status_codes() {
        const PATH: &str = "responses/status_codes";
        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let code: u16 = req.uri().query().unwrap().parse().unwrap();
            let mut res = Response::new(Full::new(Bytes::new()));
            *res.status_mut() = StatusCode::from_u16(code).unwrap();
            (res, Ok(()))
        });

        let client = crate::init_builder().no_redirects().build().unwrap();
        let status = |code: &str| {
            let mut target = crate::url(PATH);
            target.push('?');
            target.push_str(code);
            client.get(target).execute().unwrap_success().unwrap()
        };

        let res = status("200");
        assert!(res.is_successful());
        assert!(!res.is_informational());
        assert!(status("299").is_successful());
        assert!(status("226").is_successful());
        assert!(status("404").is_client_error());
        assert!(!status("404").is_server_error());
        assert!(status("503").is_server_error());
        assert!(!status("500").is_server_error());
        assert!(status("304").is_redirection());
        assert!(!status("300").is_redirection());
    }

    #[test]
    fn test_parse_json() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Item {
            id: u32,
            name: String,
        }

        const PATH: &str = "responses/json_list";
        const BODY: &str = r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#;
        let _handle = crate::add_hyper_fixture(PATH, |_| async move {
            let res = Response::new(Full::new(Bytes::from(BODY)));
            (res, Ok(()))
        });

        let client = crate::init_client();
        let res = client.get(crate::url(PATH)).execute_optional().unwrap();
        let items: Vec<Item> = res.parse_as_list().unwrap();
        assert_eq!(
            items,
            [
                Item {
                    id: 1,
                    name: "a".into()
                },
                Item {
                    id: 2,
                    name: "b".into()
                }
            ]
        );
        assert_eq!(res.parse_as_value().unwrap()[0]["name"], "a");
        assert!(res.parse_as::<Item>().is_err());
    }
}
