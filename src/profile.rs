use crate::config::CrawlerConfig;
use crate::crawlers::source::PageSource;
use crate::error::{CrawlError, Result};
use crate::parsers::{self, profile};
use crate::results::{Events, ProfileRecord};
use scraper::Html;
use tokio::sync::OnceCell;
use url::Url;

/// Lookup URL of a profile page: `<base>?keyword=<name>`
pub fn profile_url(base: &str, name: &str) -> std::result::Result<Url, url::ParseError> {
    Url::parse_with_params(base, &[("keyword", name)])
}

/// Portrait URL of a profile: `<base>/<name>.jpg`
pub fn portrait_url(base: &str, name: &str) -> std::result::Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(&format!("{name}.jpg"));
    Ok(url)
}

/// One profile page with lazily fetched, memoized fields.
///
/// Each accessor does its work at most once per instance; later calls
/// return the cached value.
pub struct ProfileFetcher<'a, S: PageSource> {
    name: String,
    url: Url,
    portrait_url: Url,
    source: &'a S,
    document: OnceCell<Html>,
    portrait: OnceCell<Vec<u8>>,
    related_names: OnceCell<Vec<String>>,
    biography: OnceCell<String>,
    organizations: OnceCell<Vec<String>>,
    subjects: OnceCell<Vec<String>>,
    events: OnceCell<Events>,
}

impl<'a, S: PageSource> ProfileFetcher<'a, S> {
    pub fn new(name: &str, config: &CrawlerConfig, source: &'a S) -> Result<Self> {
        let url = profile_url(&config.profile_base_url, name)
            .map_err(|e| CrawlError::Config(format!("profile_base_url: {e}")))?;
        let portrait_url = portrait_url(&config.image_base_url, name)
            .map_err(|e| CrawlError::Config(format!("image_base_url: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            url,
            portrait_url,
            source,
            document: OnceCell::new(),
            portrait: OnceCell::new(),
            related_names: OnceCell::new(),
            biography: OnceCell::new(),
            organizations: OnceCell::new(),
            subjects: OnceCell::new(),
            events: OnceCell::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches and parses the profile page
    pub async fn fetch_markup(&self) -> Result<&Html> {
        self.document
            .get_or_try_init(|| async move {
                ::log::info!("getting {}", self.url);
                let markup = self.source.fetch_markup(&self.url).await?;
                Ok::<_, CrawlError>(parsers::parse(&markup))
            })
            .await
    }

    /// Downloads the portrait image
    pub async fn fetch_portrait(&self) -> Result<&[u8]> {
        let bytes = self
            .portrait
            .get_or_try_init(|| async move {
                ::log::info!("downloading image of {}", self.name);
                self.source.fetch_bytes(&self.portrait_url).await
            })
            .await?;
        Ok(bytes.as_slice())
    }

    pub async fn related_names(&self) -> Result<&[String]> {
        let doc = self.fetch_markup().await?;
        let names = self
            .related_names
            .get_or_try_init(|| async move {
                ::log::info!("finding related people of {}", self.name);
                profile::related_names(doc)
            })
            .await?;
        Ok(names.as_slice())
    }

    pub async fn biography(&self) -> Result<&str> {
        let doc = self.fetch_markup().await?;
        let text = self
            .biography
            .get_or_try_init(|| async move {
                ::log::info!("finding introduction of {}", self.name);
                profile::biography(doc)
            })
            .await?;
        Ok(text.as_str())
    }

    pub async fn organizations(&self) -> Result<&[String]> {
        let doc = self.fetch_markup().await?;
        let list = self
            .organizations
            .get_or_try_init(|| async move {
                ::log::info!("finding organizations of {}", self.name);
                profile::organizations(doc)
            })
            .await?;
        Ok(list.as_slice())
    }

    pub async fn subjects(&self) -> Result<&[String]> {
        let doc = self.fetch_markup().await?;
        let list = self
            .subjects
            .get_or_try_init(|| async move {
                ::log::info!("finding subjects of {}", self.name);
                profile::subjects(doc)
            })
            .await?;
        Ok(list.as_slice())
    }

    pub async fn events(&self) -> Result<&Events> {
        let doc = self.fetch_markup().await?;
        let events = self
            .events
            .get_or_try_init(|| async move { profile::events(doc) })
            .await?;
        Ok(events)
    }

    /// Assembles the immutable record
    pub async fn to_record(&self) -> Result<ProfileRecord> {
        let related_names = self.related_names().await?.to_vec();
        let biography = self.biography().await?.to_string();
        let organizations = self.organizations().await?.to_vec();
        let subjects = self.subjects().await?.to_vec();
        let events = self.events().await?.clone();
        let portrait = self.fetch_portrait().await?.to_vec();

        Ok(ProfileRecord::new(
            self.name.clone(),
            self.url.to_string(),
            portrait,
            related_names,
            biography,
            organizations,
            subjects,
            events,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FakeSource, ProfilePage};

    #[test]
    fn test_urls() {
        let url = profile_url("http://bnu.hiwis.com/People/People_Detail", "启功").unwrap();
        assert_eq!(
            url.as_str(),
            "http://bnu.hiwis.com/People/People_Detail?keyword=%E5%90%AF%E5%8A%9F"
        );

        let url = portrait_url("http://bnu.hiwis.com/images", "A").unwrap();
        assert_eq!(url.as_str(), "http://bnu.hiwis.com/images/A.jpg");

        // Trailing slash on the base does not produce an empty segment
        let url = portrait_url("http://bnu.hiwis.com/images/", "A").unwrap();
        assert_eq!(url.as_str(), "http://bnu.hiwis.com/images/A.jpg");
    }

    #[tokio::test]
    async fn test_fields_are_memoized() {
        let config = CrawlerConfig::default();
        let source = FakeSource::new(&config).with_profile(
            ProfilePage::new("启功")
                .related(&["A", "B"])
                .organizations(&["中文系"])
                .event("1912年", &["生于北京"]),
        );
        let fetcher = ProfileFetcher::new("启功", &config, &source).unwrap();

        assert_eq!(fetcher.related_names().await.unwrap(), ["A", "B"]);
        assert_eq!(fetcher.organizations().await.unwrap(), ["中文系"]);
        assert!(fetcher.subjects().await.unwrap().is_empty());

        let record = fetcher.to_record().await.unwrap();
        let again = fetcher.to_record().await.unwrap();
        assert_eq!(record, again);
        assert_eq!(record.events().get("1912年").unwrap(), &vec!["生于北京".to_string()]);

        // One page request and one portrait request, however often fields are read
        assert_eq!(source.request_count(fetcher.url().as_str()), 1);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_page_propagates() {
        let config = CrawlerConfig::default();
        let source = FakeSource::new(&config);
        let fetcher = ProfileFetcher::new("无名", &config, &source).unwrap();

        assert!(matches!(fetcher.to_record().await, Err(CrawlError::Fetch(_))));
    }
}
