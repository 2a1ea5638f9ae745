pub mod dongqiudi_client;
