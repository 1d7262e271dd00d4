use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // Production deployments should pin the admin UI origin here
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        // Relaxed for local development so custom headers don't fail preflight
        .allow_any_header()
        // The admin UI sends cookies with its requests
        .supports_credentials()
        .max_age(3600)
}
