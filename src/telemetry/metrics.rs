use once_cell::sync::Lazy;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};

pub static METER: Lazy<Meter> = Lazy::new(|| global::meter("deals-api"));

pub static HTTP_REQUESTS_TOTAL: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("http.server.requests")
        .with_description("Total HTTP requests served")
        .build()
});

pub static HTTP_REQUEST_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    METER
        .f64_histogram("http.server.duration")
        .with_description("HTTP request latency")
        .with_unit("ms")
        .build()
});

pub static OFFERS_CREATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("offers.created")
        .with_description("Total offers created")
        .build()
});

pub static OFFERS_UPDATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("offers.updated")
        .with_description("Total offers updated")
        .build()
});

pub static OFFERS_DELETED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("offers.deleted")
        .with_description("Total offers deleted")
        .build()
});

pub static OFFERS_LIKED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("offers.liked")
        .with_description("Total direct likes, outside favorites")
        .build()
});

pub static OFFERS_FEATURED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("offers.featured")
        .with_description("Total offers promoted to featured")
        .build()
});

pub static FAVORITES_ADDED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.added")
        .with_description("Total favorites added")
        .build()
});

pub static FAVORITES_REMOVED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.removed")
        .with_description("Total favorites removed")
        .build()
});

pub static COMMENTS_CREATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("comments.created")
        .with_description("Total comments created")
        .build()
});

pub static USERS_REGISTERED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("users.registered")
        .with_description("Total users registered")
        .build()
});
