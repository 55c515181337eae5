use echoglass_skill_lib::domain::error::AppError;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    echoglass_skill_lib::run().await
}
