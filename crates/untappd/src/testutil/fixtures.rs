//! Canned API payloads
//!
//! Shapes follow the Untappd APIv4 documentation, trimmed to the fields the
//! client reads plus a few it must ignore.

use serde_json::{json, Value};

fn envelope(response: Value) -> String {
    json!({
        "meta": {
            "code": 200,
            "response_time": { "time": 0.841, "measure": "seconds" },
            "init_time": { "time": 0.001, "measure": "seconds" }
        },
        "notifications": [],
        "response": response
    })
    .to_string()
}

/// The 404 body the API sends for an unknown user
pub fn api_error_json() -> String {
    r#"{"meta":{"code":404,"error_detail":"Invalid user.","error_type":"invalid_user","response_time":{"time":0,"measure":"seconds"}}}"#
        .to_string()
}

pub fn gregavola() -> Value {
    json!({
        "uid": 1,
        "user_name": "gregavola",
        "first_name": "Greg",
        "last_name": "Avola",
        "location": "New York, NY",
        "is_supporter": 1,
        "url": "http://gregavola.com",
        "bio": "Co-Founder and CTO of Untappd",
        "relationship": "self",
        "user_avatar": "https://gravatar.com/avatar/0c6922e238dae5cccce96a32889fc911?size=100",
        "is_private": 0,
        "contact": { "foursquare": 195_741, "twitter": "gregavola", "facebook": 18_603_076 }
    })
}

/// A checkin with every section populated
pub fn checkin_value() -> Value {
    json!({
        "checkin_id": 137_117_722,
        "created_at": "Sat, 13 Dec 2014 19:15:38 +0000",
        "checkin_comment": "When in Rome..",
        "rating_score": 3,
        "user": gregavola(),
        "beer": {
            "bid": 7481,
            "beer_name": "Brooklyn Bowl Pale Ale",
            "beer_label": "https://d1c8v1qci5en44.cloudfront.net/site/assets/images/temp/badge-beer-default.png",
            "beer_style": "American Pale Ale",
            "beer_abv": 0,
            "auth_rating": 0,
            "wish_list": false,
            "beer_active": 1
        },
        "brewery": {
            "brewery_id": 1954,
            "brewery_name": "Kelso of Brooklyn",
            "brewery_slug": "kelso-of-brooklyn",
            "country_name": "United States",
            "contact": {
                "twitter": "KelsoBeer",
                "facebook": "",
                "instagram": "",
                "url": "http://www.kelsoofbrooklyn.com/"
            },
            "location": {
                "brewery_city": "Brooklyn",
                "brewery_state": "NY",
                "lat": 40.6823,
                "lng": -73.9656
            },
            "brewery_active": 1
        },
        "venue": {
            "venue_id": 2141,
            "venue_name": "Brooklyn Bowl",
            "primary_category": "Arts & Entertainment",
            "categories": { "count": 1, "items": [{ "category_name": "Bowling Alley", "is_primary": true }] },
            "location": {
                "venue_address": "61 Wythe Ave",
                "venue_city": "Brooklyn",
                "venue_state": "NY",
                "venue_country": "United States",
                "lat": 40.7219,
                "lng": -73.9575
            },
            "public_venue": true,
            "foursquare": {
                "foursquare_id": "4a1afeb7f964a520b77a1fe3",
                "foursquare_url": "http://4sq.com/3fjtlA"
            }
        },
        "comments": {
            "total_count": 0,
            "count": 1,
            "items": [{ "comment_id": 1, "comment": "hello, world", "user": { "user_name": "gregavola" } }]
        },
        "toasts": {
            "total_count": 0,
            "count": 1,
            "auth_toast": false,
            "items": [{ "like_id": 1, "user": { "user_name": "gregavola" } }]
        },
        "media": { "count": 0, "items": [] },
        "source": { "app_name": "Untappd for iPhone - (V2)" },
        "badges": {
            "count": 1,
            "items": [{
                "badge_id": 189,
                "user_badge_id": 39_410_316,
                "badge_name": "Taste the Music",
                "badge_description": "Badge Description Here",
                "created_at": "Sat, 13 Dec 2014 19:15:41 +0000",
                "badge_image": {
                    "sm": "https://d1c8v1qci5en44.cloudfront.net/badges/bdg_ConcertVenue_sm.jpg",
                    "md": "https://d1c8v1qci5en44.cloudfront.net/badges/bdg_ConcertVenue_md.jpg",
                    "lg": "https://d1c8v1qci5en44.cloudfront.net/badges/bdg_ConcertVenue_lg.jpg"
                }
            }]
        }
    })
}

pub fn checkin_json() -> String {
    checkin_value().to_string()
}

/// A checkin made at home, with the venue sent as an empty array
pub fn home_checkin_value() -> Value {
    json!({
        "checkin_id": 137_000_001,
        "created_at": "Fri, 12 Dec 2014 21:00:00 -0500",
        "checkin_comment": "",
        "rating_score": 4.5,
        "user": { "uid": 2, "user_name": "mdlayher" },
        "beer": { "bid": 4473, "beer_name": "Oberon Ale", "beer_style": "Pale Wheat Ale - American" },
        "brewery": { "brewery_id": 2507, "brewery_name": "Bell's Brewery" },
        "venue": [],
        "comments": { "count": 0, "items": [] },
        "toasts": { "count": 0, "items": [] },
        "media": { "count": 0, "items": [] },
        "badges": { "count": 0, "items": [] }
    })
}

/// Wraps checkins in the feed shape shared by every checkin listing
pub fn checkins_feed_json(items: Vec<Value>) -> String {
    envelope(json!({
        "pagination": { "max_id": 161_830_366 },
        "checkins": { "count": items.len(), "items": items }
    }))
}

/// Wraps a single checkin as returned by checkin/add
pub fn checkin_add_json() -> String {
    envelope(checkin_value())
}

pub fn user_info_json() -> String {
    let mut user = gregavola();
    user["user_avatar_hd"] = json!("https://gravatar.com/avatar/0c6922e238dae5cccce96a32889fc911?size=500");
    user["untappd_url"] = json!("https://untappd.com/user/gregavola");
    user["stats"] = json!({
        "total_badges": 392,
        "total_friends": 2391,
        "total_checkins": 4471,
        "total_beers": 2710,
        "total_created_beers": 32,
        "total_followings": 55,
        "total_photos": 1157
    });
    user["recent_brews"] = json!({ "count": 0, "items": {} });
    envelope(json!({ "user": user }))
}

pub fn user_friends_json() -> String {
    envelope(json!({
        "count": 2,
        "items": [
            { "friendship_hash": "a", "user": { "uid": 2, "user_name": "mdlayher" } },
            { "friendship_hash": "b", "user": { "uid": 3, "user_name": "untappd" } }
        ]
    }))
}

pub fn user_badges_json() -> String {
    envelope(json!({
        "count": 1,
        "items": [{
            "badge_id": 1,
            "checkin_id": 137_117_722,
            "badge_name": "Newbie",
            "badge_description": "Your first checkin",
            "badge_hint": "Check in a beer",
            "badge_active_status": 1,
            "media": {
                "badge_image_sm": "https://untappd.akamaized.net/badges/bdg_newbie_sm.jpg",
                "badge_image_md": "https://untappd.akamaized.net/badges/bdg_newbie_md.jpg",
                "badge_image_lg": "https://untappd.akamaized.net/badges/bdg_newbie_lg.jpg"
            },
            "created_at": "Sat, 13 Dec 2014 19:15:41 +0000",
            "levels": []
        }]
    }))
}

pub fn user_beers_json() -> String {
    envelope(json!({
        "total_count": 1,
        "beers": {
            "count": 1,
            "items": [{
                "first_had": "Sat, 13 Dec 2014 19:15:38 +0000",
                "recent_created_at": "Sun, 14 Dec 2014 19:15:38 +0000",
                "rating_score": 3.5,
                "count": 2,
                "beer": { "bid": 7481, "beer_name": "Brooklyn Bowl Pale Ale", "rating_score": 3.41 },
                "brewery": { "brewery_id": 1954, "brewery_name": "Kelso of Brooklyn" }
            }]
        }
    }))
}

pub fn user_wishlist_json() -> String {
    envelope(json!({
        "beers": {
            "count": 1,
            "items": [{
                "created_at": "Mon, 15 Dec 2014 10:00:00 +0000",
                "beer": { "bid": 4473, "beer_name": "Oberon Ale", "wish_list": true },
                "brewery": { "brewery_id": 2507, "brewery_name": "Bell's Brewery" }
            }]
        }
    }))
}

pub fn beer_info_json() -> String {
    envelope(json!({
        "beer": {
            "bid": 1,
            "beer_name": "Black Note Stout",
            "beer_label": "https://untappd.akamaized.net/site/beer_logos/beer-blackNote.jpg",
            "beer_abv": 11.2,
            "beer_ibu": 30,
            "beer_slug": "bell-s-black-note-stout",
            "beer_style": "Stout - Imperial / Double",
            "beer_description": "Black Note is a blend of Expedition Stout and Double Cream Stout.",
            "created_at": "Sat, 21 Aug 2010 07:34:38 +0000",
            "wish_list": false,
            "rating_score": 4.402,
            "auth_rating": 0,
            "brewery": {
                "brewery_id": 2507,
                "brewery_name": "Bell's Brewery",
                "brewery_slug": "bell-s-brewery",
                "country_name": "United States",
                "brewery_active": 1,
                "location": { "brewery_city": "Comstock", "brewery_state": "MI", "lat": 42.2848, "lng": -85.4514 }
            }
        }
    }))
}

pub fn beer_search_json() -> String {
    envelope(json!({
        "found": 1,
        "beers": {
            "count": 1,
            "items": [{
                "checkin_count": 1,
                "have_had": false,
                "beer": { "bid": 1, "beer_name": "Black Note Stout", "beer_abv": 11.2 },
                "brewery": { "brewery_id": 2507, "brewery_name": "Bell's Brewery" }
            }]
        }
    }))
}

pub fn brewery_info_json() -> String {
    envelope(json!({
        "brewery": {
            "brewery_id": 2507,
            "brewery_name": "Bell's Brewery",
            "brewery_slug": "bell-s-brewery",
            "brewery_label": "https://untappd.akamaized.net/site/brewery_logos/brewery-2507_ca8b6.jpeg",
            "country_name": "United States",
            "brewery_active": 1,
            "brewery_type": "Regional Brewery",
            "brewery_type_id": 4,
            "contact": {
                "twitter": "BellsBrewery",
                "facebook": "http://www.facebook.com/bellsbrewery",
                "instagram": "bellsbrewery",
                "url": "http://www.bellsbeer.com"
            },
            "location": { "brewery_city": "Comstock", "brewery_state": "MI", "lat": 42.2848, "lng": -85.4514 }
        }
    }))
}

pub fn brewery_search_json() -> String {
    envelope(json!({
        "found": 1,
        "brewery": {
            "count": 1,
            "items": [{
                "brewery": {
                    "brewery_id": 2507,
                    "brewery_name": "Bell's Brewery",
                    "beer_count": 500,
                    "location": { "brewery_city": "Comstock", "brewery_state": "MI" }
                }
            }]
        }
    }))
}

pub fn venue_info_json() -> String {
    envelope(json!({
        "venue": {
            "venue_id": 2141,
            "venue_name": "Brooklyn Bowl",
            "last_updated": "Sat, 13 Dec 2014 19:15:38 +0000",
            "primary_category": "Arts & Entertainment",
            "public_venue": true,
            "location": {
                "venue_address": "61 Wythe Ave",
                "venue_city": "Brooklyn",
                "venue_state": "NY",
                "venue_country": "United States",
                "lat": 40.7219,
                "lng": -73.9575
            },
            "foursquare": { "foursquare_id": "4a1afeb7f964a520b77a1fe3", "foursquare_url": "http://4sq.com/3fjtlA" },
            "venue_icon": { "sm": "sm.png", "md": "md.png", "lg": "lg.png" },
            "top_beers": { "count": 0, "items": [] },
            "checkins": { "count": 1, "items": [checkin_value()] }
        }
    }))
}
