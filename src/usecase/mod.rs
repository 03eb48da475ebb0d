pub mod review_requests;
