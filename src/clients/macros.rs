/// Generate client methods with oneshot channel boilerplate and automatic tracing.
///
/// Each generated method sends `$request::$variant { params.., respond_to }` and
/// awaits the reply, mapping a closed or dropped actor to
/// `$error::ActorCommunicationError`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $error_type::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $error_type::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
