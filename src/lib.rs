/**
 * Pressbox — sports-news content API
 *
 * A REST backend for a sports-news site: token-based authentication,
 * user-owned posts and comments, and an admin-curated game schedule
 * calendar. Every endpoint, success or failure, answers with the same
 * response envelope (`{success, message, data, timestamp}`).
 *
 * # Module map
 *
 * - `auth` - credentials, JWT issue/verify, register/login/me handlers
 * - `middleware` - authenticated-user extractors and the JSON body extractor
 * - `posts`, `comments`, `schedules` - per-resource persistence + handlers
 * - `response` - envelope and pagination contract
 * - `error` - error taxonomy and its HTTP rendering
 * - `routes`, `server` - router assembly and application state
 */

pub mod auth;
pub mod comments;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod response;
pub mod routes;
pub mod schedules;
pub mod server;
