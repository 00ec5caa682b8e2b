//! Route registration

pub mod health;
pub mod otp;
pub mod token;

use actix_web::web;

use vf_core::repositories::UserRepository;
use vf_core::services::{Notifier, OtpStore, RateLimitStore, RevocationStore, StatusCache};

/// Register every route against one concrete set of state parameters.
///
/// The binary instantiates this with the production stores; the route
/// tests instantiate it with in-process fakes.
pub fn configure<O, N, R, U, V, C>(cfg: &mut web::ServiceConfig)
where
    O: OtpStore + 'static,
    N: Notifier + 'static,
    R: RateLimitStore + 'static,
    U: UserRepository + 'static,
    V: RevocationStore + 'static,
    C: StatusCache + 'static,
{
    cfg.route("/health", web::get().to(health::health))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/issue", web::post().to(otp::issue::<O, N, R, U, V, C>))
                        .route("/verify", web::post().to(otp::verify::<O, N, R, U, V, C>))
                        .route("/resend", web::patch().to(otp::resend::<O, N, R, U, V, C>)),
                )
                .service(
                    web::scope("/token")
                        .route("/refresh", web::post().to(token::refresh::<O, N, R, U, V, C>))
                        .route("", web::delete().to(token::revoke::<O, N, R, U, V, C>)),
                ),
        );
}
