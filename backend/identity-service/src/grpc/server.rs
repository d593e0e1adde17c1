/// gRPC server implementation for identity-service
///
/// Implements:
/// - Authentication: Register, IssueCredential (public)
/// - Credential validation: VerifyCredential (public)
/// - Profile: GetProfile (authenticated, owner only)
use crate::db::UserStore;
use crate::error::IdentityError;
use crate::models::user::principal_message;
use crate::security::{hash_password, verify_password};
use crate::validators::{normalize_email, validate_email};
use crypto_core::{CredentialIssuer, CredentialVerifier};
use grpc_contracts::identity::identity_service_server::IdentityService;
use grpc_contracts::identity::*;
use grpc_jwt_propagation::{AuthLayer, OwnershipError, PrincipalExt};
use tonic::{Request, Response, Status};
use tracing::{error, info, warn};

/// Methods reachable without a credential
pub const PUBLIC_METHODS: &[&str] = &[
    "/vocaltracker.identity.IdentityService/Register",
    "/vocaltracker.identity.IdentityService/IssueCredential",
    "/vocaltracker.identity.IdentityService/VerifyCredential",
];

/// Authentication layer for the identity server: everything except
/// [`PUBLIC_METHODS`] and the health service requires a credential.
pub fn auth_layer(verifier: CredentialVerifier) -> AuthLayer {
    PUBLIC_METHODS
        .iter()
        .fold(AuthLayer::new(verifier), |layer, method| {
            layer.allow_method(*method)
        })
        .allow_service("grpc.health.v1.Health")
}

/// Same answer for unknown user and wrong password
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Identity service gRPC server
#[derive(Clone)]
pub struct IdentityGrpcService {
    users: UserStore,
    issuer: CredentialIssuer,
    verifier: CredentialVerifier,
}

impl IdentityGrpcService {
    pub fn new(users: UserStore, issuer: CredentialIssuer, verifier: CredentialVerifier) -> Self {
        Self {
            users,
            issuer,
            verifier,
        }
    }

    fn failed_auth(code: ResultCode, message: impl Into<String>) -> AuthResponse {
        AuthResponse {
            success: false,
            message: message.into(),
            credential: String::new(),
            principal: None,
            code: code as i32,
        }
    }

    fn issued(&self, user: &crate::models::User, message: &str) -> Result<AuthResponse, Status> {
        let principal = user.principal();
        let credential = self.issuer.issue(&principal).map_err(|e| {
            error!(user_id = user.id, error = %e, "Failed to issue credential");
            IdentityError::from(e).to_status()
        })?;

        Ok(AuthResponse {
            success: true,
            message: message.to_string(),
            credential,
            principal: Some(principal_message(&principal)),
            code: ResultCode::Ok as i32,
        })
    }
}

#[tonic::async_trait]
impl IdentityService for IdentityGrpcService {
    /// Register new user with email and password
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> std::result::Result<Response<AuthResponse>, Status> {
        let req = request.into_inner();
        let email = normalize_email(&req.email);

        if !validate_email(&email) {
            return Err(IdentityError::InvalidEmail(req.email).to_status());
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(IdentityError::from)
            .and_then(|hashed| hashed)
            .map_err(|e| e.to_status())?;

        let user = match self.users.create_user(&email, password_hash).await {
            Ok(user) => user,
            Err(IdentityError::EmailAlreadyExists) => {
                info!("Registration rejected: email already registered");
                return Ok(Response::new(Self::failed_auth(
                    ResultCode::Rejected,
                    IdentityError::EmailAlreadyExists.to_string(),
                )));
            }
            Err(e) => return Err(e.to_status()),
        };

        info!(user_id = user.id, "User registered");
        Ok(Response::new(self.issued(&user, "User registered successfully")?))
    }

    /// Authenticate with email and password and return a fresh credential
    async fn issue_credential(
        &self,
        request: Request<IssueCredentialRequest>,
    ) -> std::result::Result<Response<AuthResponse>, Status> {
        let req = request.into_inner();
        let email = normalize_email(&req.email);

        let Some(user) = self.users.find_by_email(&email).await else {
            warn!("Login failed: unknown email");
            return Ok(Response::new(Self::failed_auth(
                ResultCode::Rejected,
                INVALID_CREDENTIALS,
            )));
        };

        let password = req.password;
        let password_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(IdentityError::from)
            .and_then(|verified| verified)
            .map_err(|e| e.to_status())?;

        if !matches {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Ok(Response::new(Self::failed_auth(
                ResultCode::Rejected,
                INVALID_CREDENTIALS,
            )));
        }

        info!(user_id = user.id, "Credential issued");
        Ok(Response::new(self.issued(&user, "Login successful")?))
    }

    /// Run the local verifier on a credential
    async fn verify_credential(
        &self,
        request: Request<VerifyCredentialRequest>,
    ) -> std::result::Result<Response<VerifyCredentialResponse>, Status> {
        let req = request.into_inner();

        let response = match self.verifier.verify(&req.credential) {
            Ok(principal) => VerifyCredentialResponse {
                valid: true,
                message: "Token is valid".to_string(),
                principal: Some(principal_message(&principal)),
            },
            Err(kind) => {
                warn!(reason = %kind, "Credential verification failed");
                VerifyCredentialResponse {
                    valid: false,
                    message: "Invalid token".to_string(),
                    principal: None,
                }
            }
        };

        Ok(Response::new(response))
    }

    /// Return the caller's own profile
    async fn get_profile(
        &self,
        request: Request<GetProfileRequest>,
    ) -> std::result::Result<Response<GetProfileResponse>, Status> {
        let target_user_id = request.get_ref().target_user_id;

        let principal = match request.require_ownership(target_user_id) {
            Ok(principal) => principal,
            Err(OwnershipError::Forbidden { .. }) => {
                return Ok(Response::new(GetProfileResponse {
                    success: false,
                    message: "Access denied: can only view your own profile".to_string(),
                    code: ResultCode::Forbidden as i32,
                    user: None,
                }));
            }
            Err(e @ OwnershipError::Unauthenticated) => return Err(e.into()),
        };

        let response = match self.users.find_by_id(principal.id).await {
            Some(user) => GetProfileResponse {
                success: true,
                message: "Profile retrieved successfully".to_string(),
                code: ResultCode::Ok as i32,
                user: Some(user.to_profile()),
            },
            None => GetProfileResponse {
                success: false,
                message: IdentityError::UserNotFound.to_string(),
                code: ResultCode::NotFound as i32,
                user: None,
            },
        };

        Ok(Response::new(response))
    }
}
