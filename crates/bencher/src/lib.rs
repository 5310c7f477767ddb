/// An `Accept-Encoding` value to benchmark, grouped by how much work it takes to resolve.
#[derive(Debug, Copy, Clone)]
pub struct HeaderCase {
    name: &'static str,
    group: HeaderGroup,
    value: &'static str,
}

impl HeaderCase {
    pub const fn new(name: &'static str, group: HeaderGroup, value: &'static str) -> Self {
        Self { name, group, value }
    }

    pub const fn simple(name: &'static str, value: &'static str) -> Self {
        Self::new(name, HeaderGroup::Simple, value)
    }

    pub const fn weighted(name: &'static str, value: &'static str) -> Self {
        Self::new(name, HeaderGroup::Weighted, value)
    }

    pub const fn malformed(name: &'static str, value: &'static str) -> Self {
        Self::new(name, HeaderGroup::Malformed, value)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> HeaderGroup {
        self.group
    }

    pub fn value(&self) -> &'static str {
        self.value
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderGroup {
    /// Plain coding lists as browsers send them
    Simple,
    /// Lists with quality values, wildcards and exclusions
    Weighted,
    /// Lists the tokenizer has to recover from
    Malformed,
}

impl HeaderGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderGroup::Simple => "simple",
            HeaderGroup::Weighted => "weighted",
            HeaderGroup::Malformed => "malformed",
        }
    }
}

/// Field values seen in the wild, plus a few hostile ones.
pub static HEADER_CASES: &[HeaderCase] = &[
    HeaderCase::simple("empty", ""),
    HeaderCase::simple("curl", "deflate, gzip"),
    HeaderCase::simple("chrome", "gzip, deflate, br, zstd"),
    HeaderCase::weighted("firefox_legacy", "gzip;q=1.0, identity; q=0.5, *;q=0"),
    HeaderCase::weighted("exclusions", "gzip, *, br;q=0, bzip;q=0, compress;q=0, identity;q=0.001"),
    HeaderCase::weighted(
        "long_list",
        "zstd;q=0.9, br;q=0.95, gzip;q=0.8, deflate;q=0.5, compress;q=0.1, x-gzip;q=0.8, exi;q=0.2, \
         pack200-gzip;q=0.05, aes128gcm;q=0, *;q=0.01",
    ),
    HeaderCase::malformed("bad_weights", "gzip;q=1.9, br;q=0.1234, deflate;Q=0.5, zstd;q=0.5;x=y, identity"),
    HeaderCase::malformed("garbage", "\"gzip\", ;;, , br / 2, gzip gzip, \t*\t;\tq=0.5 ,,"),
];
