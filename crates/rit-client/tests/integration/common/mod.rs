pub mod mock_rit;
