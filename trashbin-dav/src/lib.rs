use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;

use trashbin_core::{
    model::view, settings::Settings, RawEntry, RemotePath, Transport, TransportError,
};

pub use error::DavError;

mod error;

const LISTING_ENDPOINT: [&str; 5] = ["index.php", "apps", "files_trashbin", "ajax", "list.php"];
const DAV_ENDPOINT: [&str; 3] = ["remote.php", "dav", "trashbin"];

#[derive(Debug, Deserialize)]
struct ListResponse {
    status: String,
    #[serde(default)]
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(default)]
    files: Vec<RawEntry>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    permissions: Option<u32>,
}

/// Talks to the trash bin of a single user: listings through the trash app
/// endpoint, delete and restore through webdav.
#[derive(Debug)]
pub struct DavTransport {
    base: Url,
    client: Client,
    password: Option<String>,
    user: String,
}

impl DavTransport {
    pub fn new(settings: &Settings) -> Result<Self, DavError> {
        let mut base = Url::parse(&settings.server)
            .map_err(|err| DavError::InvalidUrl(format!("{}: {}", settings.server, err)))?;

        {
            let mut segments = base
                .path_segments_mut()
                .map_err(|_| DavError::InvalidUrl(settings.server.clone()))?;

            segments.pop_if_empty();
            segments.extend(settings.web_root.split('/').filter(|s| !s.is_empty()));
        }

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            base,
            client,
            password: settings.password.clone(),
            user: settings.user.clone(),
        })
    }

    pub fn dav_url(&self, path: &RemotePath) -> Url {
        let collection = path.collection.as_str();
        self.url(
            DAV_ENDPOINT
                .iter()
                .copied()
                .chain([self.user.as_str(), collection])
                .chain(path.segments.iter().map(|s| s.as_str())),
        )
    }

    pub fn list_url(&self, dir: &[String]) -> Url {
        let mut url = self.url(LISTING_ENDPOINT.iter().copied());
        url.query_pairs_mut().append_pair("dir", &view::to_dir(dir));
        url
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, TransportError> {
        let request = match &self.password {
            Some(password) => request.basic_auth(&self.user, Some(password)),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| to_transport_error(path, err))?;

        check_status(path, response)
    }
}

#[async_trait]
impl Transport for DavTransport {
    #[tracing::instrument(skip(self))]
    async fn list(&self, dir: &[String]) -> Result<Vec<RawEntry>, TransportError> {
        let path = view::to_dir(dir);
        let url = self.list_url(dir);
        tracing::debug!("requesting listing: {}", url);

        let response = self.send(&path, self.client.get(url)).await?;
        let body = response
            .json::<ListResponse>()
            .await
            .map_err(|err| TransportError::Decode(path.clone(), err.to_string()))?;

        decode_listing(&path, body)
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, path: &RemotePath) -> Result<(), TransportError> {
        let url = self.dav_url(path);
        if path.is_collection() {
            tracing::info!("purging trash collection of {}", self.user);
        } else {
            tracing::debug!("requesting delete: {}", url);
        }

        self.send(&path.to_string(), self.client.delete(url)).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn move_to(
        &self,
        source: &RemotePath,
        destination: &RemotePath,
    ) -> Result<(), TransportError> {
        let path = source.to_string();
        let method = Method::from_bytes(b"MOVE")
            .map_err(|err| TransportError::Request(path.clone(), err.to_string()))?;

        let url = self.dav_url(source);
        let target = self.dav_url(destination);
        tracing::debug!("requesting move: {} -> {}", url, target);

        let request = self
            .client
            .request(method, url)
            .header("Destination", target.as_str())
            .header("Overwrite", "T");

        self.send(&path, request).await?;

        Ok(())
    }
}

fn decode_listing(path: &str, response: ListResponse) -> Result<Vec<RawEntry>, TransportError> {
    if response.status != "success" {
        let message = response
            .data
            .and_then(|data| data.message)
            .unwrap_or_else(|| format!("unexpected status {}", response.status));

        return Err(TransportError::Decode(path.to_owned(), message));
    }

    let Some(data) = response.data else {
        return Err(TransportError::Decode(
            path.to_owned(),
            "listing without data".to_owned(),
        ));
    };

    tracing::trace!(
        "ignoring reported permissions {:?} for {}",
        data.permissions,
        path
    );

    Ok(data.files)
}

fn check_status(path: &str, response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            path: path.to_owned(),
            status: status.as_u16(),
        })
    }
}

fn to_transport_error(path: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(path.to_owned())
    } else {
        TransportError::Request(path.to_owned(), err.to_string())
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use trashbin_core::{settings::Settings, Collection, RawKind, RemotePath, TransportError};

    use super::{decode_listing, DavTransport, ListResponse};

    fn transport(server: &str, web_root: &str) -> DavTransport {
        let settings = Settings {
            server: server.to_string(),
            timeout: Duration::from_secs(5),
            user: "user".to_string(),
            web_root: web_root.to_string(),
            ..Default::default()
        };

        DavTransport::new(&settings).unwrap()
    }

    #[test]
    fn list_url_encodes_dir() {
        let transport = transport("http://localhost", "");

        assert_eq!(
            "http://localhost/index.php/apps/files_trashbin/ajax/list.php?dir=%2F",
            transport.list_url(&[]).as_str()
        );
        assert_eq!(
            "http://localhost/index.php/apps/files_trashbin/ajax/list.php?dir=%2Fsubdir",
            transport.list_url(&["subdir".to_string()]).as_str()
        );
    }

    #[test]
    fn dav_url_below_web_root() {
        let transport = transport("https://cloud.example.com/", "/nextcloud/");
        let path = RemotePath::new(Collection::Trash, vec!["One.txt.d11111".to_string()]);

        assert_eq!(
            "https://cloud.example.com/nextcloud/remote.php/dav/trashbin/user/trash/One.txt.d11111",
            transport.dav_url(&path).as_str()
        );
        assert_eq!(
            "https://cloud.example.com/nextcloud/remote.php/dav/trashbin/user/restore",
            transport
                .dav_url(&RemotePath::collection(Collection::Restore))
                .as_str()
        );
    }

    #[test]
    fn dav_url_escapes_segments() {
        let transport = transport("http://localhost", "");
        let path = RemotePath::new(
            Collection::Trash,
            vec!["some dir.d1".to_string(), "a#b.txt".to_string()],
        );

        assert_eq!(
            "http://localhost/remote.php/dav/trashbin/user/trash/some%20dir.d1/a%23b.txt",
            transport.dav_url(&path).as_str()
        );
    }

    #[test]
    fn dav_url_for_collection() {
        let transport = transport("http://localhost", "");

        assert_eq!(
            "http://localhost/remote.php/dav/trashbin/user/trash",
            transport
                .dav_url(&RemotePath::collection(Collection::Trash))
                .as_str()
        );
    }

    #[test]
    fn invalid_server_is_rejected() {
        let settings = Settings {
            server: "not a url".to_string(),
            ..Default::default()
        };

        assert!(DavTransport::new(&settings).is_err());
    }

    #[test]
    fn decode_listing_envelope() {
        let body = r#"{
            "status": "success",
            "data": {
                "permissions": 31,
                "directory": "/",
                "files": [
                    {
                        "id": 1,
                        "parentId": 0,
                        "type": "file",
                        "name": "One.txt.d11111",
                        "mtime": 11111000,
                        "mimetype": "text/plain",
                        "etag": "abc",
                        "permissions": 9,
                        "size": 12
                    },
                    {
                        "id": 4,
                        "type": "dir",
                        "name": "somedir.d99999",
                        "mtime": 99999000,
                        "mimetype": "httpd/unix-directory",
                        "etag": "456"
                    }
                ]
            }
        }"#;

        let response: ListResponse = serde_json::from_str(body).unwrap();
        let files = decode_listing("/", response).unwrap();

        assert_eq!(2, files.len());
        assert_eq!("One.txt.d11111", files[0].name);
        assert_eq!(Some(9), files[0].permissions);
        assert_eq!(RawKind::Dir, files[1].kind);
        assert_eq!(None, files[1].size);
    }

    #[test]
    fn decode_listing_error_status() {
        let body = r#"{"status": "error", "data": {"message": "Directory not found"}}"#;

        let response: ListResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            Err(TransportError::Decode(
                "/missing".to_string(),
                "Directory not found".to_string()
            )),
            decode_listing("/missing", response)
        );
    }
}
