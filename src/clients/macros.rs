/// Generate `fetch_<plural>` and `fetch_<singular>` GET methods for a REST
/// collection, with tracing on every call.
macro_rules! impl_resource_endpoints {
    ($backend:ty, $($path:literal => $plural:ident, $singular:ident: $entity:ty;)+) => {
        paste::paste! {
            impl $backend {
                $(
                    #[tracing::instrument(skip(self))]
                    pub async fn [<fetch_ $plural>](&self) -> Result<Vec<$entity>, crate::error::RequestError> {
                        tracing::debug!("Sending request");
                        self.request(concat!("/", $path), RequestOptions::default()).await
                    }

                    #[tracing::instrument(skip(self))]
                    pub async fn [<fetch_ $singular>](&self, id: u64) -> Result<$entity, crate::error::RequestError> {
                        tracing::debug!("Sending request");
                        self.request(&format!(concat!("/", $path, "/{}"), id), RequestOptions::default()).await
                    }
                )+
            }
        }
    };
}

/// Generate request/response client methods with oneshot channel boilerplate
/// and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, crate::error::AppError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| crate::error::AppError::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| crate::error::AppError::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
