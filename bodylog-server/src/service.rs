//! `myservice.v1.MyService` with request/response logging

use std::future::{ready, Ready};
use std::task::{Context, Poll};
use tonic::{Request, Response, Status};
use tower::{Service, ServiceExt};

use bodylog::grpc::{LoggingLayer, LoggingService};

pub mod pb {
    tonic::include_proto!("myservice.v1");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("myservice_descriptor");
}

use pb::my_service_server::MyService;
use pb::{GetUserRequest, GetUserResponse, User};

bodylog::structured_payload!(GetUserRequest, GetUserResponse);

/// Dummy GetUser logic
#[derive(Debug, Clone, Copy, Default)]
pub struct GetUserHandler;

impl Service<Request<GetUserRequest>> for GetUserHandler {
    type Response = Response<GetUserResponse>;
    type Error = Status;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<GetUserRequest>) -> Self::Future {
        tracing::info!("--- [Server Logic] GetUser called ---");

        let user_id = req.into_inner().user_id;
        if user_id == "error" {
            tracing::error!(user_id = %user_id, "User not found");
            return ready(Err(Status::not_found("user not found")));
        }

        ready(Ok(Response::new(GetUserResponse {
            user: Some(User {
                user_id,
                name: "haru256".to_string(),
            }),
        })))
    }
}

/// MyService with every method wrapped in the logging layer
#[derive(Clone)]
pub struct MyServiceImpl {
    get_user: LoggingService<GetUserHandler>,
}

impl MyServiceImpl {
    pub fn new(logging: &LoggingLayer) -> Self {
        Self {
            get_user: logging.wrap(GetUserHandler),
        }
    }
}

#[tonic::async_trait]
impl MyService for MyServiceImpl {
    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        self.get_user.clone().oneshot(request).await
    }
}
