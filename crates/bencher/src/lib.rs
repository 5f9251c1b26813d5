use http::{HeaderMap, HeaderValue, Method, Uri};
use micro_spdy::protocol::{HeaderBlock, LoadFlags, RequestInfo};

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    block: TestBlock,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, block: TestBlock) -> Self {
        Self { name, group, block }
    }

    pub fn small(name: &'static str, block: TestBlock) -> Self {
        Self::new(name, TestGroup::Small, block)
    }

    pub fn normal(name: &'static str, block: TestBlock) -> Self {
        Self::new(name, TestGroup::Normal, block)
    }

    pub fn large(name: &'static str, block: TestBlock) -> Self {
        Self::new(name, TestGroup::Large, block)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn block(&self) -> &TestBlock {
        &self.block
    }
}

/// Raw transport fields of a header block, values may be NUL folded.
#[derive(Debug, Copy, Clone)]
pub struct TestBlock {
    fields: &'static [(&'static str, &'static str)],
}

impl TestBlock {
    pub const fn new(fields: &'static [(&'static str, &'static str)]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [(&'static str, &'static str)] {
        self.fields
    }

    /// Size of the fields as they travel in a name/value block.
    pub fn wire_len(&self) -> usize {
        2 + self.fields.iter().map(|(name, value)| 4 + name.len() + value.len()).sum::<usize>()
    }

    pub fn header_block(&self) -> HeaderBlock {
        HeaderBlock::try_from_fields(self.fields.iter().copied()).expect("bench fields should be valid header fields")
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

pub static SMALL_REPLY: TestBlock = TestBlock::new(&[("status", "200 OK"), ("version", "HTTP/1.1"), ("content-length", "13")]);

pub static LARGE_REPLY: TestBlock = TestBlock::new(&[
    ("status", "200 OK"),
    ("version", "HTTP/1.1"),
    ("cache-control", "private, max-age=0"),
    ("content-encoding", "gzip"),
    ("content-type", "text/html; charset=UTF-8"),
    ("date", "Tue, 15 Jun 2010 20:31:04 GMT"),
    ("expires", "-1"),
    ("server", "gws"),
    ("set-cookie", "PREF=ID=5f9a3c1e2d4b6a70:TM=1276633864:LM=1276633864:S=Xq0vHf2k8Zb1YtR3; expires=Thu, 14-Jun-2012 20:31:04 GMT; path=/; domain=.example.com\0NID=35=aGVsbG8gd29ybGQgZnJvbSB0aGUgYmVuY2g; expires=Wed, 15-Dec-2010 20:31:04 GMT; path=/; domain=.example.com; HttpOnly"),
    ("vary", "Accept-Encoding"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "1; mode=block"),
]);

/// A browser style GET with a handful of caller headers.
pub fn browser_request() -> RequestInfo {
    let mut extra = HeaderMap::new();
    extra.append("accept", HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"));
    extra.append("accept-encoding", HeaderValue::from_static("gzip,deflate,sdch"));
    extra.append("accept-language", HeaderValue::from_static("en-US,en;q=0.8"));
    extra.append("user-agent", HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/534.3 (KHTML, like Gecko) Chrome/6.0.437.3 Safari/534.3"));
    extra.append("cookie", HeaderValue::from_static("PREF=ID=5f9a3c1e2d4b6a70"));
    extra.append("cookie", HeaderValue::from_static("NID=35=aGVsbG8gd29ybGQ"));

    RequestInfo::new(Method::GET, Uri::from_static("https://www.example.com/search?q=spdy&hl=en"))
        .with_referrer(Uri::from_static("https://www.example.com/"))
        .with_extra_headers(extra)
        .with_load_flags(LoadFlags::VALIDATE_CACHE)
}
