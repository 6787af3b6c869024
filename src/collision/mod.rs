pub mod broadphase;
pub mod narrowphase;
pub mod queries;
pub mod response;
